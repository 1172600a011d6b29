//! # doc-answer
//!
//! An HTTP service that answers natural-language questions about a single
//! document. Each request names a document URL and a list of questions; the
//! service downloads the document, splits it into overlapping segments,
//! retrieves the most relevant segments per question and asks an LLM to
//! answer from them.
//!
//! ## Architecture
//!
//! Every request builds its own retrieval state; nothing is indexed ahead of
//! time.
//!
//! ```text
//!              ┌──────────────────────────────┐
//!              │ POST /hackrx/run             │
//!              │ Bearer check (middleware)    │
//!              └──────────────┬───────────────┘
//!                             │
//!                             ▼
//!              ┌──────────────────────────────┐
//!              │ Fetch document (≤ 20 MiB)    │
//!              │ PDF → pdf-extract, else text │
//!              └──────────────┬───────────────┘
//!                             │
//!                             ▼
//!              ┌──────────────────────────────┐
//!              │ Segment: 1000 chars,         │
//!              │ 200 overlap, paragraph-aware │
//!              └──────────────┬───────────────┘
//!                             │
//!                ┌────────────┴────────────┐
//!                ▼                         ▼
//!       ┌────────────────┐       ┌──────────────────┐
//!       │ BM25 (tantivy, │       │ Segment vectors  │
//!       │ in RAM)        │       │ (optional API)   │
//!       └───────┬────────┘       └────────┬─────────┘
//!               │    per question, ≤ 4 concurrent
//!               └────────────┬────────────┘
//!                            ▼
//!              ┌──────────────────────────────┐
//!              │ RRF fusion + top-rank bonus  │
//!              │ keep top 5 segments          │
//!              └──────────────┬───────────────┘
//!                             │
//!                             ▼
//!              ┌──────────────────────────────┐
//!              │ LLM answer (Gemini, OpenAI,  │
//!              │ or Ollama)                   │
//!              └──────────────┬───────────────┘
//!                             │
//!                             ▼
//!              ┌──────────────────────────────┐
//!              │ {"answers": [...]} in order  │
//!              └──────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration and startup validation
//! - [`models`] - Request/response envelopes and the query log record
//! - [`document`] - Document download, format detection and text extraction
//! - [`chunking`] - Paragraph-aware segmenting with word-aligned overlap
//! - [`search::bm25`] - Per-request BM25 index powered by tantivy
//! - [`search::vector`] - Cosine ranking over segment embeddings
//! - [`search::hybrid`] - Reciprocal Rank Fusion of the two rankings
//! - [`llm::embeddings`] - Batch embedding generation via OpenAI-compatible or Ollama APIs
//! - [`llm::answer`] - Prompt building and answer generation
//! - [`query_log`] - Optional JSON-file log of answered runs
//! - [`api`] - Axum router, bearer middleware and handlers
//! - [`error`] - HTTP error type and status mapping
//! - [`state`] - Shared application state

pub mod api;
pub mod chunking;
pub mod config;
pub mod document;
pub mod error;
pub mod llm;
pub mod models;
pub mod query_log;
pub mod search;
pub mod state;
