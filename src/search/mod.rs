//! Per-request retrieval over one document's segments.

pub mod bm25;
pub mod hybrid;
pub mod vector;

use anyhow::Result;

use crate::chunking::TextSegment;
use bm25::SegmentIndex;
use vector::VectorIndex;

/// Candidates fetched from each ranking before fusion, as a multiple of `top_k`.
const CANDIDATE_FACTOR: usize = 3;

/// A segment selected as context for one question.
#[derive(Debug, Clone)]
pub struct RetrievedSegment {
    pub index: usize,
    pub content: String,
    pub score: f32,
}

pub struct Retriever {
    segments: Vec<TextSegment>,
    bm25: SegmentIndex,
    vectors: Option<VectorIndex>,
    top_k: usize,
}

impl Retriever {
    pub fn new(
        segments: Vec<TextSegment>,
        bm25: SegmentIndex,
        vectors: Option<VectorIndex>,
        top_k: usize,
    ) -> Self {
        Self {
            segments,
            bm25,
            vectors,
            top_k: top_k.max(1),
        }
    }

    pub fn has_vectors(&self) -> bool {
        self.vectors.is_some()
    }

    /// Select up to `top_k` segments for a question. Vector ranking joins
    /// only when both segment vectors and a query embedding are present.
    /// With no lexical or semantic match the leading segments are used.
    pub fn retrieve(
        &self,
        question: &str,
        query_embedding: Option<&[f32]>,
    ) -> Result<Vec<RetrievedSegment>> {
        if self.segments.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = self
            .top_k
            .saturating_mul(CANDIDATE_FACTOR)
            .min(self.segments.len());
        let bm25_hits = self.bm25.search(question, candidates)?;
        let vector_hits = match (&self.vectors, query_embedding) {
            (Some(vectors), Some(embedding)) => vectors.search(embedding, candidates),
            _ => Vec::new(),
        };

        let fused = hybrid::rrf_fusion(&bm25_hits, &vector_hits, self.top_k);
        let mut selected: Vec<RetrievedSegment> = fused
            .into_iter()
            .filter_map(|hit| {
                self.segments.get(hit.segment).map(|s| RetrievedSegment {
                    index: s.index,
                    content: s.content.clone(),
                    score: hit.combined_score,
                })
            })
            .collect();

        if selected.is_empty() {
            tracing::debug!("No ranked segments for question, using leading segments");
            selected = self
                .segments
                .iter()
                .take(self.top_k)
                .map(|s| RetrievedSegment {
                    index: s.index,
                    content: s.content.clone(),
                    score: 0.0,
                })
                .collect();
        }

        Ok(selected)
    }
}
