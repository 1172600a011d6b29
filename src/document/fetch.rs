use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use url::Url;

use super::FetchError;
use crate::config::FetchConfig;

/// Raw body of a downloaded document.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub url: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Parse and check a caller-supplied document URL. Only http(s) is fetched.
pub fn parse_document_url(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw).map_err(|e| FetchError::InvalidUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::InvalidUrl(format!(
            "unsupported scheme '{other}', only http and https are allowed"
        ))),
    }
}

/// Download a document, enforcing the configured timeout and size cap.
pub async fn fetch_document(
    client: &reqwest::Client,
    config: &FetchConfig,
    url: &Url,
) -> Result<FetchedDocument, FetchError> {
    let map_err = |e: reqwest::Error| {
        if e.is_timeout() {
            FetchError::Timeout(config.timeout())
        } else {
            FetchError::Network(e)
        }
    };

    let mut resp = client
        .get(url.clone())
        .timeout(config.timeout())
        .send()
        .await
        .map_err(map_err)?;

    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
        return Err(FetchError::NotFound(url.to_string()));
    }
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    if resp
        .content_length()
        .is_some_and(|len| len > config.max_bytes as u64)
    {
        return Err(FetchError::TooLarge(config.max_bytes));
    }

    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    // Content-Length can be absent or wrong, so cap while reading too
    let mut bytes = Vec::new();
    while let Some(chunk) = resp.chunk().await.map_err(map_err)? {
        if bytes.len() + chunk.len() > config.max_bytes {
            return Err(FetchError::TooLarge(config.max_bytes));
        }
        bytes.extend_from_slice(&chunk);
    }

    tracing::debug!("Fetched {} bytes from {url}", bytes.len());

    Ok(FetchedDocument {
        url: url.to_string(),
        content_type,
        bytes,
    })
}
