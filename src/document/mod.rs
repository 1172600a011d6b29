//! Document loading: download, detect the format, extract and clean text.

pub mod docx;
pub mod fetch;
pub mod pdf;

use std::time::Duration;
use thiserror::Error;

pub use fetch::{fetch_document, parse_document_url, FetchedDocument};

/// Cleaned text shorter than this is treated as an unreadable document.
const MIN_TEXT_CHARS: usize = 10;

/// Local file header that opens every ZIP archive, .docx included.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// How far into the body to look for NUL bytes when sniffing binary content.
const SNIFF_BYTES: usize = 1024;

/// Errors that can occur while loading a document
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid document URL: {0}")]
    InvalidUrl(String),
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("document host returned HTTP {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("download timed out after {0:?}")]
    Timeout(Duration),
    #[error("document too large: more than {0} bytes")]
    TooLarge(usize),
    #[error("unsupported document format: {0}")]
    Unsupported(String),
    #[error("failed to parse document: {0}")]
    Parse(String),
    #[error("document appears to be empty or unreadable")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

/// Text pulled out of a fetched document, ready for segmenting.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub source_url: String,
    pub kind: DocumentKind,
    pub text: String,
}

/// Decide how to read the body: magic bytes first, then the declared
/// content type, then the URL suffix.
pub fn detect_kind(
    bytes: &[u8],
    content_type: Option<&str>,
    url: &str,
) -> Result<DocumentKind, FetchError> {
    if bytes.starts_with(b"%PDF-") {
        return Ok(DocumentKind::Pdf);
    }
    if content_type.is_some_and(|ct| ct.to_ascii_lowercase().contains("application/pdf")) {
        return Ok(DocumentKind::Pdf);
    }
    let path = url.split(['?', '#']).next().unwrap_or(url).to_ascii_lowercase();
    if path.ends_with(".pdf") {
        return Ok(DocumentKind::Pdf);
    }
    if bytes.starts_with(ZIP_MAGIC) {
        let declared = content_type
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("wordprocessingml.document"));
        if declared || path.ends_with(".docx") {
            return Ok(DocumentKind::Docx);
        }
    }
    let head = &bytes[..bytes.len().min(SNIFF_BYTES)];
    if head.contains(&0) {
        return Err(FetchError::Unsupported(
            content_type.unwrap_or("binary data").to_string(),
        ));
    }
    Ok(DocumentKind::PlainText)
}

/// Extract and clean the text of a fetched document.
pub async fn extract(fetched: FetchedDocument) -> Result<ExtractedDocument, FetchError> {
    let kind = detect_kind(
        &fetched.bytes,
        fetched.content_type.as_deref(),
        &fetched.url,
    )?;

    let raw = match kind {
        DocumentKind::Pdf => {
            let bytes = fetched.bytes;
            // pdf-extract is CPU-bound and can panic on malformed input
            tokio::task::spawn_blocking(move || pdf::extract_pdf_text(&bytes))
                .await
                .map_err(|e| FetchError::Parse(format!("PDF extraction aborted: {e}")))??
        }
        DocumentKind::Docx => {
            let bytes = fetched.bytes;
            tokio::task::spawn_blocking(move || docx::extract_docx_text(&bytes))
                .await
                .map_err(|e| FetchError::Parse(format!("DOCX extraction aborted: {e}")))??
        }
        DocumentKind::PlainText => String::from_utf8_lossy(&fetched.bytes).into_owned(),
    };

    let text = clean_text(&raw);
    if text.chars().count() < MIN_TEXT_CHARS {
        return Err(FetchError::Empty);
    }

    Ok(ExtractedDocument {
        source_url: fetched.url,
        kind,
        text,
    })
}

/// Trim every line and collapse runs of blank lines into one paragraph break.
pub fn clean_text(text: &str) -> String {
    text.lines()
        .map(|l| l.trim())
        .fold(Vec::new(), |mut acc: Vec<&str>, line| {
            if line.is_empty() {
                if acc.last().is_some_and(|l| !l.is_empty()) {
                    acc.push("");
                }
            } else {
                acc.push(line);
            }
            acc
        })
        .join("\n")
        .trim()
        .to_string()
}
