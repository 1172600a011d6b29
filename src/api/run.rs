use std::time::Instant;

use anyhow::Context;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use futures_util::{stream, StreamExt, TryStreamExt};
use tracing::Instrument;
use url::Url;
use uuid::Uuid;

use crate::chunking::{split_text, TextSegment};
use crate::document::{self, fetch_document, parse_document_url};
use crate::error::ApiError;
use crate::llm::answer::answer_question;
use crate::llm::embeddings::{embed_batch, embed_single};
use crate::models::{RunRequest, RunResponse};
use crate::search::bm25::SegmentIndex;
use crate::search::vector::VectorIndex;
use crate::search::Retriever;
use crate::state::AppState;

/// POST /hackrx/run - answer every question from one document:
///   1. Fetch the document and extract its text
///   2. Split into overlapping segments and index them (BM25, plus vectors
///      when an embedding service is configured)
///   3. Per question, retrieve the top segments and ask the LLM
///
/// Questions run concurrently up to `llm.max_concurrency`; answers keep
/// question order. Any failed question fails the whole run.
pub async fn run(
    State(state): State<AppState>,
    payload: Result<Json<RunRequest>, JsonRejection>,
) -> Result<Json<RunResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let raw_url = req
        .documents
        .primary_url()
        .ok_or_else(|| ApiError::BadRequest("documents must be a non-empty URL".to_string()))?;
    let url = parse_document_url(raw_url)?;
    if req.questions.iter().any(|q| q.trim().is_empty()) {
        return Err(ApiError::BadRequest(
            "questions must not be blank".to_string(),
        ));
    }

    let request_id = Uuid::new_v4();
    let budget = state.config.request_timeout();
    let started = Instant::now();
    let span = tracing::info_span!("run", %request_id, document = %url);

    let (answers, segment_count) = tokio::time::timeout(
        budget,
        answer_all(&state, &url, &req.questions).instrument(span),
    )
    .await
    .map_err(|_| ApiError::Timeout(budget))??;

    tracing::info!(
        %request_id,
        questions = req.questions.len(),
        segments = segment_count,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Run complete"
    );

    if let Some(log) = state.query_log.clone() {
        let document_url = url.to_string();
        let questions = req.questions.clone();
        let logged = answers.clone();
        let result = tokio::task::spawn_blocking(move || {
            log.record(&document_url, &questions, &logged, segment_count)
        })
        .await;
        match result {
            Ok(Ok(record)) => tracing::debug!("Logged run as {}", record.id),
            Ok(Err(e)) => tracing::warn!("Failed to persist query log: {e:#}"),
            Err(e) => tracing::warn!("Query log task failed: {e}"),
        }
    }

    Ok(Json(RunResponse { answers }))
}

/// Returns the answers and the document's segment count.
async fn answer_all(
    state: &AppState,
    url: &Url,
    questions: &[String],
) -> Result<(Vec<String>, usize), ApiError> {
    let config = &state.config;

    let fetched = fetch_document(&state.http_client, &config.fetch, url).await?;
    let document = document::extract(fetched).await?;
    let segments = split_text(&document.text, &config.chunking);
    let segment_count = segments.len();
    tracing::info!(
        source_url = %document.source_url,
        kind = ?document.kind,
        chars = document.text.len(),
        segments = segment_count,
        questions = questions.len(),
        "Document loaded"
    );

    if questions.is_empty() {
        return Ok((Vec::new(), segment_count));
    }

    let retriever = build_retriever(state, segments).await?;
    let retriever = &retriever;
    // Owned items keep the per-question futures free of higher-ranked borrows
    let answers: Vec<String> = stream::iter(questions.iter().cloned().enumerate())
        .map(|(position, question)| async move {
            answer_one(state, retriever, position, &question).await
        })
        .buffered(config.llm.max_concurrency.max(1))
        .try_collect()
        .await?;

    Ok((answers, segment_count))
}

async fn build_retriever(
    state: &AppState,
    segments: Vec<TextSegment>,
) -> Result<Retriever, ApiError> {
    let config = &state.config;

    let vectors = if config.embedding.enabled() {
        let texts: Vec<String> = segments.iter().map(|s| s.content.clone()).collect();
        let embeddings = embed_batch(&state.http_client, &config.embedding, &texts)
            .await
            .context("Failed to embed document segments")
            .map_err(ApiError::Upstream)?;
        Some(VectorIndex::new(embeddings))
    } else {
        None
    };

    let (segments, bm25) = tokio::task::spawn_blocking(move || {
        SegmentIndex::build(&segments).map(|index| (segments, index))
    })
    .await
    .map_err(|e| ApiError::Internal(anyhow::Error::new(e).context("Index task failed")))?
    .map_err(ApiError::Internal)?;

    Ok(Retriever::new(segments, bm25, vectors, config.retrieval.top_k))
}

async fn answer_one(
    state: &AppState,
    retriever: &Retriever,
    position: usize,
    question: &str,
) -> Result<String, ApiError> {
    let query_embedding = if retriever.has_vectors() {
        let embedding = embed_single(&state.http_client, &state.config.embedding, question)
            .await
            .with_context(|| format!("Failed to embed question {}", position + 1))
            .map_err(ApiError::Upstream)?;
        Some(embedding)
    } else {
        None
    };

    let context = retriever
        .retrieve(question, query_embedding.as_deref())
        .map_err(ApiError::Internal)?;
    tracing::debug!(
        question = position + 1,
        segments = ?context.iter().map(|s| s.index).collect::<Vec<_>>(),
        "Retrieved context"
    );

    answer_question(&state.http_client, &state.config.llm, question, &context)
        .await
        .with_context(|| format!("Failed to answer question {}", position + 1))
        .map_err(ApiError::Upstream)
}
