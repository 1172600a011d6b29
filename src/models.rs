use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Document reference as sent by callers: one URL, or a list whose first
/// entry is used.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DocumentRef {
    Single(String),
    Many(Vec<String>),
}

impl DocumentRef {
    /// The URL to fetch, trimmed. `None` when blank or an empty list.
    pub fn primary_url(&self) -> Option<&str> {
        let url = match self {
            DocumentRef::Single(url) => url.as_str(),
            DocumentRef::Many(urls) => urls.first()?.as_str(),
        };
        let url = url.trim();
        (!url.is_empty()).then_some(url)
    }
}

/// Run request
#[derive(Debug, Clone, Deserialize)]
pub struct RunRequest {
    pub documents: DocumentRef,
    #[serde(default)]
    pub questions: Vec<String>,
}

/// Run response: one answer per question, same order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunResponse {
    pub answers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub endpoints: Vec<&'static str>,
}

/// One logged run, keyed by a fingerprint of its inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryRecord {
    pub id: String,
    pub document_url: String,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    pub segment_count: usize,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    /// How many times this exact request has been answered
    pub submissions: u64,
}
