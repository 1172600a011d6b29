use anyhow::{Context, Result};
use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::schema::*;
use tantivy::{doc, Index, IndexReader, IndexWriter, ReloadPolicy};

use crate::chunking::TextSegment;

/// Writer arena for a single-threaded in-RAM build (tantivy's floor is 15 MB).
const WRITER_MEMORY_BYTES: usize = 20_000_000;

/// BM25 index over one document's segments, built in RAM per request.
pub struct SegmentIndex {
    index: Index,
    reader: IndexReader,
    f_segment: Field,
    f_content: Field,
}

#[derive(Debug, Clone)]
pub struct Bm25Hit {
    /// Index of the matching segment.
    pub segment: usize,
    pub score: f32,
}

impl SegmentIndex {
    /// Index every segment of a document.
    pub fn build(segments: &[TextSegment]) -> Result<Self> {
        let mut schema_builder = Schema::builder();
        let f_segment =
            schema_builder.add_u64_field("segment", NumericOptions::default() | STORED);
        let f_content = schema_builder.add_text_field("content", TEXT);
        let schema = schema_builder.build();

        let index = Index::create_in_ram(schema);
        let mut writer: IndexWriter = index
            .writer_with_num_threads(1, WRITER_MEMORY_BYTES)
            .context("Failed to create index writer")?;

        for segment in segments {
            writer.add_document(doc!(
                f_segment => segment.index as u64,
                f_content => segment.content.as_str(),
            ))?;
        }
        writer.commit().context("Failed to commit segment index")?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .context("Failed to create reader")?;

        Ok(Self {
            index,
            reader,
            f_segment,
            f_content,
        })
    }

    /// Rank segments against a free-text question.
    pub fn search(&self, question: &str, limit: usize) -> Result<Vec<Bm25Hit>> {
        let query_str = sanitize_query(question);
        if query_str.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let searcher = self.reader.searcher();
        let query_parser = QueryParser::for_index(&self.index, vec![self.f_content]);
        let query = query_parser
            .parse_query(&query_str)
            .context("Failed to parse search query")?;

        let top_docs = searcher
            .search(&query, &TopDocs::with_limit(limit))
            .context("Search failed")?;

        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, doc_address) in top_docs {
            let doc: TantivyDocument = searcher
                .doc(doc_address)
                .context("Failed to retrieve document")?;
            let Some(segment) = doc.get_first(self.f_segment).and_then(|v| v.as_u64()) else {
                continue;
            };
            hits.push(Bm25Hit {
                segment: segment as usize,
                score,
            });
        }

        Ok(hits)
    }
}

/// Reduce a question to bare lowercase terms so tantivy's query syntax
/// (`:`, quotes, `AND`/`OR`/`NOT`, brackets) can never fail the parse.
fn sanitize_query(question: &str) -> String {
    question
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
