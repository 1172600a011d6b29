use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::document::FetchError;
use crate::models::ErrorResponse;

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid or missing bearer token")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    #[error("failed to load document: {0}")]
    DocumentFetch(#[from] FetchError),
    #[error("upstream service error: {0:#}")]
    Upstream(anyhow::Error),
    #[error("request exceeded {}s budget", .0.as_secs())]
    Timeout(Duration),
    #[error("{0}")]
    NotFound(String),
    #[error("internal error")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) | ApiError::DocumentFetch(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(e) => tracing::error!("Internal error: {e:#}"),
            ApiError::Upstream(e) => tracing::warn!("Upstream failure: {e:#}"),
            ApiError::DocumentFetch(e) => tracing::warn!("Document fetch failed: {e}"),
            _ => {}
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
