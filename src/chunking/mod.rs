//! Document segmenting: paragraph-aware pieces merged up to a character
//! budget, with a word-aligned overlap between consecutive segments.

pub mod paragraph;

use crate::config::ChunkConfig;
use paragraph::{char_len, overlap_start, paragraphs, split_span, Span};

/// One slice of the document text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSegment {
    /// 0-based position in the document.
    pub index: usize,
    pub content: String,
    /// Byte offset of the segment start in the cleaned text.
    pub start: usize,
    /// Byte offset one past the segment end.
    pub end: usize,
}

/// Split text into overlapping segments of at most `chunk_size` characters.
pub fn split_text(text: &str, config: &ChunkConfig) -> Vec<TextSegment> {
    let max = config.chunk_size.max(1);
    let overlap = config.chunk_overlap.min(max - 1);

    let pieces: Vec<Span> = paragraphs(text)
        .into_iter()
        .flat_map(|p| split_span(text, p, max))
        .collect();

    let mut spans: Vec<Span> = Vec::new();
    let mut current: Option<Span> = None;

    for piece in pieces {
        current = Some(match current {
            None => piece,
            Some(cur) if char_len(&text[cur.start..piece.end]) <= max => Span {
                start: cur.start,
                end: piece.end,
            },
            Some(cur) => {
                spans.push(cur);
                // Overlap plus the gap and the new piece must still fit
                let room = max.saturating_sub(char_len(&text[cur.end..piece.end]));
                let start = overlap_start(text, cur, overlap.min(room)).unwrap_or(piece.start);
                Span {
                    start,
                    end: piece.end,
                }
            }
        });
    }
    if let Some(cur) = current {
        spans.push(cur);
    }

    spans
        .into_iter()
        .enumerate()
        .map(|(index, span)| TextSegment {
            index,
            content: text[span.start..span.end].to_string(),
            start: span.start,
            end: span.end,
        })
        .collect()
}
