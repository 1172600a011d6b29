use anyhow::Context;
use tracing_subscriber::EnvFilter;

use doc_answer::api;
use doc_answer::config::Config;
use doc_answer::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    config.validate().context("Invalid configuration")?;
    tracing::info!("LLM provider: {} ({})", config.llm.provider, config.llm.model);
    if config.embedding.enabled() {
        tracing::info!(
            "Embedding provider: {} ({})",
            config.embedding.provider,
            config.embedding.model
        );
    } else {
        tracing::info!("Embedding provider disabled, using BM25 retrieval only");
    }

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config)?;
    if let Some(log) = &state.query_log {
        tracing::info!("Logging runs to {}", log.path().display());
    }

    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;
    tracing::info!("Server listening on {bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
