use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Hard ceiling on the per-request budget, whatever the environment says.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Largest accepted `RETRIEVAL_TOP_K`; the prompt carries every selected segment.
const MAX_TOP_K: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,
    /// Static bearer credential expected on protected routes
    #[serde(skip_serializing)]
    pub auth_token: String,
    /// Wall-clock budget for one run request, in seconds
    pub request_timeout_secs: u64,
    /// Reasoning service (answer generation)
    pub llm: LlmConfig,
    /// Embedding service used for vector retrieval
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub chunking: ChunkConfig,
    pub fetch: FetchConfig,
    /// Connection string for the query log (`file://` URL or bare path)
    pub database_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "gemini", "openai" or "ollama"
    pub provider: String,
    /// Base URL for the LLM API
    pub base_url: String,
    /// Model name for answer generation
    pub model: String,
    /// API key (not needed for a local Ollama)
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Reasoning calls in flight per request
    pub max_concurrency: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// "none", "openai" or "ollama"
    pub provider: String,
    pub base_url: String,
    pub model: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Segments handed to the reasoning service per question
    pub top_k: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkConfig {
    /// Maximum characters per segment
    pub chunk_size: usize,
    /// Characters carried over from the previous segment
    pub chunk_overlap: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Document download timeout in seconds
    pub timeout_secs: u64,
    /// Largest document body accepted, in bytes
    pub max_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            auth_token: String::new(),
            request_timeout_secs: 30,
            llm: LlmConfig::default(),
            embedding: EmbeddingConfig::default(),
            retrieval: RetrievalConfig::default(),
            chunking: ChunkConfig::default(),
            fetch: FetchConfig::default(),
            database_url: None,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            base_url: default_llm_base_url("gemini").to_string(),
            model: default_llm_model("gemini").to_string(),
            api_key: None,
            temperature: 0.2,
            max_output_tokens: 512,
            max_concurrency: 4,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "none".to_string(),
            base_url: default_embedding_base_url("openai").to_string(),
            model: "text-embedding-3-small".to_string(),
            api_key: None,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 5 }
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_bytes: 20 * 1024 * 1024,
        }
    }
}

impl EmbeddingConfig {
    /// Whether vector retrieval is switched on.
    pub fn enabled(&self) -> bool {
        self.provider != "none"
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_llm_base_url(provider: &str) -> &'static str {
    match provider {
        "openai" => "https://api.openai.com",
        "ollama" => "http://localhost:11434",
        _ => "https://generativelanguage.googleapis.com",
    }
}

fn default_llm_model(provider: &str) -> &'static str {
    match provider {
        "openai" => "gpt-4o-mini",
        "ollama" => "llama3.2",
        _ => "gemini-2.5-flash",
    }
}

fn default_embedding_base_url(provider: &str) -> &'static str {
    match provider {
        "ollama" => "http://localhost:11434",
        _ => "https://api.openai.com",
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(port) = env_parse::<u16>("PORT") {
            config.bind_addr = format!("0.0.0.0:{port}");
        }
        if let Ok(addr) = std::env::var("BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(token) = std::env::var("HACKRX_BEARER_TOKEN") {
            config.auth_token = token.trim().to_string();
        }
        if let Some(v) = env_parse("REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = v;
        }

        // Reasoning service. Provider first so the URL and model defaults follow it.
        if let Ok(provider) = std::env::var("LLM_PROVIDER") {
            let provider = provider.trim().to_lowercase();
            config.llm.base_url = default_llm_base_url(&provider).to_string();
            config.llm.model = default_llm_model(&provider).to_string();
            config.llm.provider = provider;
        }
        if let Ok(url) = std::env::var("LLM_BASE_URL") {
            config.llm.base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(model) = std::env::var("LLM_MODEL").or_else(|_| std::env::var("GEMINI_MODEL")) {
            config.llm.model = model;
        }
        if let Ok(key) = std::env::var("LLM_API_KEY").or_else(|_| std::env::var("GEMINI_API_KEY")) {
            config.llm.api_key = Some(key);
        }
        if let Some(v) = env_parse("LLM_TEMPERATURE") {
            config.llm.temperature = v;
        }
        if let Some(v) = env_parse("LLM_MAX_OUTPUT_TOKENS") {
            config.llm.max_output_tokens = v;
        }
        if let Some(v) = env_parse::<usize>("LLM_MAX_CONCURRENCY") {
            config.llm.max_concurrency = v.max(1);
        }

        // Embedding service
        if let Ok(provider) = std::env::var("EMBEDDING_PROVIDER") {
            let provider = provider.trim().to_lowercase();
            config.embedding.base_url = default_embedding_base_url(&provider).to_string();
            config.embedding.provider = provider;
        }
        if let Ok(url) = std::env::var("EMBEDDING_BASE_URL") {
            config.embedding.base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(model) = std::env::var("EMBEDDING_MODEL") {
            config.embedding.model = model;
        }
        if let Ok(key) = std::env::var("EMBEDDING_API_KEY") {
            config.embedding.api_key = Some(key);
        }

        if let Some(v) = env_parse("RETRIEVAL_TOP_K") {
            config.retrieval.top_k = v;
        }
        if let Some(v) = env_parse("CHUNK_SIZE") {
            config.chunking.chunk_size = v;
        }
        if let Some(v) = env_parse("CHUNK_OVERLAP") {
            config.chunking.chunk_overlap = v;
        }
        if let Some(v) = env_parse("FETCH_TIMEOUT_SECS") {
            config.fetch.timeout_secs = v;
        }
        if let Some(v) = env_parse("FETCH_MAX_BYTES") {
            config.fetch.max_bytes = v;
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.trim().is_empty() {
                config.database_url = Some(url.trim().to_string());
            }
        }

        config
    }

    /// Reject configurations the service cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.auth_token.trim().is_empty() {
            bail!("HACKRX_BEARER_TOKEN must be set to a non-empty value");
        }
        match self.llm.provider.as_str() {
            "gemini" | "openai" => {
                if self.llm.api_key.as_deref().unwrap_or_default().is_empty() {
                    bail!("LLM provider '{}' requires LLM_API_KEY", self.llm.provider);
                }
            }
            "ollama" => {}
            other => bail!("Unknown LLM provider: {other}"),
        }
        match self.embedding.provider.as_str() {
            "none" | "openai" | "ollama" => {}
            other => bail!("Unknown embedding provider: {other}"),
        }
        if self.chunking.chunk_size == 0 {
            bail!("CHUNK_SIZE must be greater than zero");
        }
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            bail!(
                "CHUNK_OVERLAP ({}) must be smaller than CHUNK_SIZE ({})",
                self.chunking.chunk_overlap,
                self.chunking.chunk_size
            );
        }
        if self.retrieval.top_k == 0 {
            bail!("RETRIEVAL_TOP_K must be greater than zero");
        }
        if self.retrieval.top_k > MAX_TOP_K {
            bail!("RETRIEVAL_TOP_K must be at most {MAX_TOP_K}");
        }
        self.query_log_path()?;
        Ok(())
    }

    /// Overall budget for a run request, capped.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.clamp(1, MAX_REQUEST_TIMEOUT_SECS))
    }

    /// Resolve `database_url` to the query log file, if one is configured.
    pub fn query_log_path(&self) -> Result<Option<PathBuf>> {
        let Some(url) = self.database_url.as_deref() else {
            return Ok(None);
        };
        if let Some(path) = url.strip_prefix("file://") {
            return Ok(Some(PathBuf::from(path)));
        }
        if let Some(path) = url.strip_prefix("file:") {
            return Ok(Some(PathBuf::from(path)));
        }
        if url.contains("://") {
            bail!("Unsupported DATABASE_URL scheme (expected file:// or a path): {url}");
        }
        Ok(Some(PathBuf::from(url)))
    }
}
