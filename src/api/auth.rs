use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

/// Reject requests whose `Authorization` header is not exactly `Bearer <token>`.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    if !is_authorized(header, &state.config.auth_token) {
        tracing::debug!("Rejected request to {}", request.uri().path());
        return Err(ApiError::Unauthorized);
    }
    Ok(next.run(request).await)
}

fn is_authorized(header: Option<&str>, token: &str) -> bool {
    match header {
        Some(value) => !token.is_empty() && value == format!("Bearer {token}"),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_required() {
        assert!(is_authorized(Some("Bearer s3cret"), "s3cret"));
        assert!(!is_authorized(Some("Bearer wrong"), "s3cret"));
        assert!(!is_authorized(Some("bearer s3cret"), "s3cret"));
        assert!(!is_authorized(Some("Bearer  s3cret"), "s3cret"));
        assert!(!is_authorized(Some("s3cret"), "s3cret"));
        assert!(!is_authorized(None, "s3cret"));
    }

    #[test]
    fn test_empty_token_never_matches() {
        assert!(!is_authorized(Some("Bearer "), ""));
    }
}
