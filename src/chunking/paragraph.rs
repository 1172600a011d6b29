//! Paragraph-aware splitting of document text into bounded pieces.
//!
//! Three-tier strategy for each paragraph (blank-line separated block):
//! 1. Keep it whole if it fits the character budget
//! 2. Otherwise cut at the last sentence end in the window
//! 3. Otherwise at the last whitespace, and as a last resort at a char boundary

/// Byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

const SENTENCE_ENDS: [&str; 4] = [". ", "? ", "! ", ".\n"];

pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Blank-line separated blocks, with surrounding whitespace excluded.
pub fn paragraphs(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut current: Option<Span> = None;
    let mut offset = 0usize;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        if line.trim().is_empty() {
            if let Some(span) = current.take() {
                spans.push(span);
            }
            continue;
        }

        let content_end = line_start + line.trim_end().len();
        match current.as_mut() {
            Some(span) => span.end = content_end,
            None => {
                let lead = line.len() - line.trim_start().len();
                current = Some(Span {
                    start: line_start + lead,
                    end: content_end,
                });
            }
        }
    }

    if let Some(span) = current {
        spans.push(span);
    }
    spans
}

/// Cut a span into pieces of at most `max_chars` characters.
pub fn split_span(text: &str, span: Span, max_chars: usize) -> Vec<Span> {
    let mut pieces = Vec::new();
    let mut start = span.start;

    while char_len(&text[start..span.end]) > max_chars {
        let window_end = text[start..]
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| start + i)
            .unwrap_or(span.end);
        let window = &text[start..window_end];

        let cut = find_break(window).map_or(window_end, |i| start + i);
        let piece_end = start + text[start..cut].trim_end().len();
        pieces.push(Span {
            start,
            end: piece_end,
        });

        let rest = &text[cut..span.end];
        start = span.end - rest.trim_start().len();
    }

    if start < span.end {
        pieces.push(Span {
            start,
            end: span.end,
        });
    }
    pieces
}

/// Byte offset to cut `window` at, preferring sentence ends in its second half.
fn find_break(window: &str) -> Option<usize> {
    let half = window.len() / 2;
    let sentence = SENTENCE_ENDS
        .iter()
        .filter_map(|p| window.rfind(p).map(|i| i + 1))
        .max()
        .filter(|&i| i > half);

    sentence.or_else(|| window.rfind(char::is_whitespace).filter(|&i| i > 0))
}

/// Start of the overlap carried from `prev` into the next segment: at most
/// `max_chars` characters, beginning on a word boundary. `None` means no overlap.
pub fn overlap_start(text: &str, prev: Span, max_chars: usize) -> Option<usize> {
    if max_chars == 0 {
        return None;
    }
    let prev_text = &text[prev.start..prev.end];
    let total = char_len(prev_text);
    // Never carry the whole previous segment
    let skip = total.saturating_sub(max_chars).max(1);
    let mut idx = prev.start + prev_text.char_indices().nth(skip).map(|(i, _)| i)?;

    if !text[..idx].ends_with(char::is_whitespace) {
        idx += text[idx..prev.end].find(char::is_whitespace)?;
    }

    let trimmed = text[idx..prev.end].trim_start();
    if trimmed.is_empty() {
        return None;
    }
    Some(prev.end - trimmed.len())
}
