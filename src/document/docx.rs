//! Word (.docx) text extraction via docx-rs.

use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild};

use super::FetchError;

/// Pull the paragraph text out of a .docx archive, one paragraph per line.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, FetchError> {
    let docx = read_docx(bytes)
        .map_err(|e| FetchError::Parse(format!("failed to read DOCX: {e:?}")))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
            _ => None,
        })
        .filter(|text| !text.trim().is_empty())
        .collect();

    if paragraphs.is_empty() {
        return Err(FetchError::Parse("DOCX contains no text".to_string()));
    }

    Ok(paragraphs.join("\n"))
}

/// Runs within a paragraph are fragments of the same line.
fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for part in &run.children {
                if let RunChild::Text(t) = part {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}

/// Build a small .docx in memory, one paragraph per entry.
#[cfg(test)]
pub(crate) fn sample_docx(paragraphs: &[&str]) -> Vec<u8> {
    use docx_rs::{Docx, Run};

    let docx = paragraphs.iter().fold(Docx::new(), |docx, text| {
        docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)))
    });
    let mut out = std::io::Cursor::new(Vec::new());
    docx.build().pack(&mut out).unwrap();
    out.into_inner()
}
