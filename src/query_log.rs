//! Optional JSON-file log of answered runs, one record per distinct request.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};

use crate::models::QueryRecord;

pub struct QueryLog {
    path: PathBuf,
    records: RwLock<Vec<QueryRecord>>,
}

impl QueryLog {
    /// Open the log at `path`, loading existing records. A missing file is an
    /// empty log; an unreadable or corrupt one is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let records = if path.exists() {
            let data = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read query log {}", path.display()))?;
            if data.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&data)
                    .with_context(|| format!("Corrupt query log {}", path.display()))?
            }
        } else {
            Vec::new()
        };

        tracing::debug!("Loaded query log {} ({} records)", path.display(), records.len());
        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Upsert the record for this document and question list, then persist.
    pub fn record(
        &self,
        document_url: &str,
        questions: &[String],
        answers: &[String],
        segment_count: usize,
    ) -> Result<QueryRecord> {
        let id = fingerprint(document_url, questions);
        let now = Utc::now();

        let mut records = self.records.write();
        let record = match records.iter_mut().find(|r| r.id == id) {
            Some(existing) => {
                existing.answers = answers.to_vec();
                existing.segment_count = segment_count;
                existing.last_seen = now;
                existing.submissions += 1;
                existing.clone()
            }
            None => {
                let record = QueryRecord {
                    id,
                    document_url: document_url.to_string(),
                    questions: questions.to_vec(),
                    answers: answers.to_vec(),
                    segment_count,
                    first_seen: now,
                    last_seen: now,
                    submissions: 1,
                };
                records.push(record.clone());
                record
            }
        };

        // Written under the lock so concurrent runs cannot interleave files
        persist(&self.path, &records)?;
        Ok(record)
    }

    /// All records, most recently seen first.
    pub fn list(&self) -> Vec<QueryRecord> {
        // Newest insertions first among equal timestamps
        let mut records: Vec<QueryRecord> = self.records.read().iter().rev().cloned().collect();
        records.sort_by(|a, b| b.last_seen.cmp(&a.last_seen));
        records
    }

    pub fn get(&self, id: &str) -> Option<QueryRecord> {
        self.records.read().iter().find(|r| r.id == id).cloned()
    }
}

/// Atomic write via temp file + rename.
fn persist(path: &Path, records: &[QueryRecord]) -> Result<()> {
    let data = serde_json::to_string_pretty(records).context("Failed to serialize query log")?;
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, data)
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

/// Stable id for a request: SHA-256 over the URL and the ordered questions.
pub fn fingerprint(document_url: &str, questions: &[String]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(document_url.as_bytes());
    for q in questions {
        hasher.update(b"\x1f");
        hasher.update(q.as_bytes());
    }
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
