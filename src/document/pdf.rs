//! PDF text extraction via pdf-extract.

use super::FetchError;

/// Extract the text layer of a PDF held in memory.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, FetchError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| FetchError::Parse(format!("failed to extract text from PDF: {e}")))?;

    if text.trim().is_empty() {
        // Scanned documents have no text layer
        return Err(FetchError::Parse(
            "PDF contains no extractable text (may be image-only)".to_string(),
        ));
    }

    Ok(text)
}

/// Build a one-page PDF showing `line` in Helvetica, with a valid xref table.
#[cfg(test)]
pub(crate) fn sample_pdf(line: &str) -> Vec<u8> {
    let content = format!("BT /F1 12 Tf 72 720 Td ({line}) Tj ET");
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_at = out.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
        objects.len() + 1
    ));
    out.extend_from_slice(xref.as_bytes());
    out
}
