//! TOML-based configuration for Lectern.
//!
//! Infrastructure settings (server address, rate limits, provider
//! endpoints, storage paths) load from `lectern.toml`. Every field has
//! a default so a missing file yields a runnable local configuration.
//! Secrets are never stored in the file; it carries the *names* of the
//! environment variables that hold them.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::{AppError, Result};

/// Root configuration loaded from `lectern.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LecternConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Admission control settings.
    #[serde(default)]
    pub limits: RateLimitConfig,

    /// Orchestration settings.
    #[serde(default)]
    pub research: ResearchConfig,

    /// External provider endpoints and credentials.
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Document library and session persistence paths.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl LecternConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Internal(format!("failed to read config {}: {}", path.display(), e))
        })?;
        toml::from_str(&raw).map_err(|e| {
            AppError::Internal(format!("failed to parse config {}: {}", path.display(), e))
        })
    }

    /// Load from a file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }
}

// ============= Server Configuration =============

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

// ============= Rate Limiting =============

/// Sliding-window admission control settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests admitted per client per window.
    #[serde(default = "default_max_requests")]
    pub max_requests: usize,

    /// Window length in seconds.
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,

    /// How often idle client windows are swept, in seconds.
    #[serde(default = "default_sweep_interval_seconds")]
    pub sweep_interval_seconds: u64,
}

fn default_max_requests() -> usize {
    crate::limiter::DEFAULT_MAX_REQUESTS
}

fn default_window_seconds() -> u64 {
    crate::limiter::DEFAULT_WINDOW_SECONDS
}

fn default_sweep_interval_seconds() -> u64 {
    300
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_seconds: default_window_seconds(),
            sweep_interval_seconds: default_sweep_interval_seconds(),
        }
    }
}

// ============= Research Orchestration =============

/// Orchestration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchConfig {
    /// Per-provider deadline in seconds. A provider still pending when
    /// it fires is recorded as a timeout failure for that source only.
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,

    /// Passages retrieved per answer-engine query.
    #[serde(default = "default_answer_top_k")]
    pub answer_top_k: usize,

    /// Paper hits requested per query.
    #[serde(default = "default_search_max_results")]
    pub paper_max_results: usize,

    /// Web hits requested per query.
    #[serde(default = "default_search_max_results")]
    pub web_max_results: usize,
}

fn default_provider_timeout_secs() -> u64 {
    30
}

fn default_answer_top_k() -> usize {
    3
}

fn default_search_max_results() -> usize {
    5
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            provider_timeout_secs: default_provider_timeout_secs(),
            answer_top_k: default_answer_top_k(),
            paper_max_results: default_search_max_results(),
            web_max_results: default_search_max_results(),
        }
    }
}

// ============= Providers =============

/// External provider endpoints and credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// LLM used for answer synthesis.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Passage retrieval endpoint (the answer engine's index).
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Academic paper search.
    #[serde(default)]
    pub arxiv: ArxivConfig,
}

/// OpenAI-compatible LLM settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Environment variable holding the API key.
    #[serde(default = "default_openai_key_env")]
    pub api_key_env: String,

    /// API base URL.
    #[serde(default = "default_openai_api_base")]
    pub api_base: String,

    /// Model identifier.
    #[serde(default = "default_openai_model")]
    pub model: String,
}

fn default_openai_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_openai_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_openai_key_env(),
            api_base: default_openai_api_base(),
            model: default_openai_model(),
        }
    }
}

impl OpenAiConfig {
    /// Resolve the API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env).map_err(|_| {
            AppError::Internal(format!(
                "environment variable {} not set",
                self.api_key_env
            ))
        })
    }
}

/// Passage retrieval endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Search endpoint URL of the retrieval service.
    #[serde(default = "default_retrieval_url")]
    pub url: String,
}

fn default_retrieval_url() -> String {
    "http://127.0.0.1:8600/search".to_string()
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            url: default_retrieval_url(),
        }
    }
}

/// arXiv API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArxivConfig {
    /// Query endpoint of the arXiv export API.
    #[serde(default = "default_arxiv_base_url")]
    pub base_url: String,
}

fn default_arxiv_base_url() -> String {
    "https://export.arxiv.org/api/query".to_string()
}

impl Default for ArxivConfig {
    fn default() -> Self {
        Self {
            base_url: default_arxiv_base_url(),
        }
    }
}

// ============= Storage =============

/// Document library and session persistence paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding researchable documents.
    #[serde(default = "default_documents_dir")]
    pub documents_dir: String,

    /// Directory session snapshots are written to.
    #[serde(default = "default_sessions_dir")]
    pub sessions_dir: String,
}

fn default_documents_dir() -> String {
    "./data/documents".to_string()
}

fn default_sessions_dir() -> String {
    "./data/sessions".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            documents_dir: default_documents_dir(),
            sessions_dir: default_sessions_dir(),
        }
    }
}
