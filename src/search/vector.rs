/// Segment embeddings for one document, searched by cosine similarity.
pub struct VectorIndex {
    /// Parallel with the document's segments.
    embeddings: Vec<Vec<f32>>,
}

#[derive(Debug, Clone)]
pub struct VectorHit {
    pub segment: usize,
    pub score: f32,
}

impl VectorIndex {
    pub fn new(embeddings: Vec<Vec<f32>>) -> Self {
        Self { embeddings }
    }

    /// Search by cosine similarity against a query embedding.
    pub fn search(&self, query_embedding: &[f32], limit: usize) -> Vec<VectorHit> {
        let mut scored: Vec<VectorHit> = self
            .embeddings
            .iter()
            .enumerate()
            .map(|(segment, e)| VectorHit {
                segment,
                score: cosine_similarity(query_embedding, e),
            })
            .collect();

        // Sort descending by score, earlier segments first on ties
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.segment.cmp(&b.segment))
        });
        scored.truncate(limit);
        scored
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}
