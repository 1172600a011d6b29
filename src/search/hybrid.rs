use std::collections::HashMap;

use crate::search::bm25::Bm25Hit;
use crate::search::vector::VectorHit;

/// RRF constant
const RRF_K: f32 = 60.0;
/// Added once to any segment ranked first in either list
const TOP_RANK_BONUS: f32 = 0.05;

/// A segment after fusing the BM25 and vector rankings.
#[derive(Debug, Clone)]
pub struct FusedHit {
    pub segment: usize,
    pub bm25_score: f32,
    pub vector_score: f32,
    pub combined_score: f32,
}

/// Reciprocal Rank Fusion of the two ranked lists with a top-rank bonus.
pub fn rrf_fusion(bm25_hits: &[Bm25Hit], vector_hits: &[VectorHit], limit: usize) -> Vec<FusedHit> {
    let mut score_map: HashMap<usize, FusedHit> = HashMap::new();
    let mut top_ranked: Vec<usize> = Vec::new();

    let ranked = bm25_hits
        .iter()
        .map(|h| (h.segment, h.score, true))
        .enumerate()
        .chain(
            vector_hits
                .iter()
                .map(|h| (h.segment, h.score, false))
                .enumerate(),
        );

    for (rank, (segment, score, is_bm25)) in ranked {
        if rank == 0 && !top_ranked.contains(&segment) {
            top_ranked.push(segment);
        }

        let entry = score_map.entry(segment).or_insert_with(|| FusedHit {
            segment,
            bm25_score: 0.0,
            vector_score: 0.0,
            combined_score: 0.0,
        });

        if is_bm25 {
            entry.bm25_score = entry.bm25_score.max(score);
        } else {
            entry.vector_score = entry.vector_score.max(score);
        }
        entry.combined_score += 1.0 / (RRF_K + rank as f32 + 1.0);
    }

    for segment in top_ranked {
        if let Some(hit) = score_map.get_mut(&segment) {
            hit.combined_score += TOP_RANK_BONUS;
        }
    }

    let mut results: Vec<FusedHit> = score_map.into_values().collect();
    results.sort_by(|a, b| {
        b.combined_score
            .partial_cmp(&a.combined_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.segment.cmp(&b.segment))
    });
    results.truncate(limit);
    results
}
