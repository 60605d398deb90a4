use anyhow::{Context, Result};
use serde::Deserialize;

/// Prefix for environment overrides, e.g. `TIMECARD__SERVICE__HTTP__PORT=8080`
pub const ENV_PREFIX: &str = "TIMECARD";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,

    /// Directory of a built frontend to serve for non-API paths
    #[serde(default)]
    pub static_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,

    /// Request body cap for image uploads
    pub max_upload_bytes: usize,

    /// Allow any origin (the browser frontend is usually hosted elsewhere)
    pub cors_permissive: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// OpenAI-compatible API root; `/chat/completions` is appended
    pub base_url: String,
    pub model: String,

    /// Name of the environment variable holding the API key
    pub api_key_env: String,
}

impl ExtractionConfig {
    /// Read the API key from the environment. A missing key is not an
    /// error here; the upstream rejects the first request instead.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env).ok()
    }
}

impl Config {
    /// Load from `path` (extension optional, file optional), then apply
    /// `TIMECARD__*` environment overrides on top of the built-in defaults.
    pub fn load(path: &str) -> Result<Self> {
        let settings = Self::defaults()?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .with_context(|| format!("Failed to read config from {}", path))?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(config::Config::builder()
            .set_default("service.name", "timecard-calculator")?
            .set_default("service.http.bind", "0.0.0.0")?
            .set_default("service.http.port", 5000)?
            .set_default("service.http.max_upload_bytes", 16 * 1024 * 1024)?
            .set_default("service.http.cors_permissive", true)?
            .set_default("extraction.base_url", "https://api.groq.com/openai/v1")?
            .set_default(
                "extraction.model",
                "meta-llama/llama-4-maverick-17b-128e-instruct",
            )?
            .set_default("extraction.api_key_env", "GROQ_API_KEY")?)
    }
}
