//! HTTP surface: the run endpoint, query log browsing and service probes.

pub mod auth;
pub mod queries;
pub mod run;
pub mod system;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    // Bearer check runs before any body extraction
    let protected = Router::new()
        .route("/hackrx/run", post(run::run))
        .route("/api/v1/hackrx/run", post(run::run))
        .route("/queries", get(queries::list_queries))
        .route("/queries/{id}", get(queries::get_query))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));

    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(protected)
        .fallback(system::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
