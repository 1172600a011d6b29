use axum::extract::{Path, State};
use axum::Json;

use crate::error::ApiError;
use crate::models::QueryRecord;
use crate::state::AppState;

/// GET /queries - logged runs, newest first. Empty when the log is disabled.
pub async fn list_queries(State(state): State<AppState>) -> Json<Vec<QueryRecord>> {
    let records = state
        .query_log
        .as_ref()
        .map(|log| log.list())
        .unwrap_or_default();
    Json(records)
}

/// GET /queries/{id}
pub async fn get_query(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<QueryRecord>, ApiError> {
    state
        .query_log
        .as_ref()
        .and_then(|log| log.get(&id))
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("query {id} not found")))
}
