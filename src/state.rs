use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::query_log::QueryLog;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http_client: reqwest::Client,
    /// Present when `DATABASE_URL` is configured.
    pub query_log: Option<Arc<QueryLog>>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let query_log = match config.query_log_path()? {
            Some(path) => Some(Arc::new(QueryLog::open(path)?)),
            None => None,
        };

        Ok(Self {
            config: Arc::new(config),
            http_client: reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(10))
                .timeout(Duration::from_secs(120))
                .build()?,
            query_log,
        })
    }
}
