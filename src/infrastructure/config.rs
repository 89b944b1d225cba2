//! Application configuration

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::services::ExtractionServiceConfig;
use crate::domain::value_objects::ExtractionSettings;

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Ollama API base URL (OpenAI-compatible)
    pub ollama_base_url: String,
    /// Model used for scene extraction
    pub ollama_model: String,

    /// Per-attempt timeout for a model call
    pub llm_timeout_secs: u64,
    /// Retries after the first attempt for transient model errors
    pub llm_max_retries: usize,
    /// Delay before the first retry, doubling afterwards
    pub llm_retry_initial_backoff_ms: u64,
    /// Chapters extracted at the same time
    pub extraction_concurrency: usize,

    /// Extraction, validation and repair settings
    pub extraction: ExtractionSettings,

    /// Largest accepted request body; whole books arrive in one request
    pub max_request_bytes: usize,

    /// HTTP server port
    pub server_port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            ollama_base_url: env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:11434/v1".to_string()),
            ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.1".to_string()),

            llm_timeout_secs: parse_var("LLM_TIMEOUT_SECS", "180")?,
            llm_max_retries: parse_var("LLM_MAX_RETRIES", "3")?,
            llm_retry_initial_backoff_ms: parse_var("LLM_RETRY_INITIAL_BACKOFF_MS", "2000")?,
            extraction_concurrency: parse_var("EXTRACTION_CONCURRENCY", "2")?,

            extraction: ExtractionSettings::from_env(),

            max_request_bytes: parse_var("MAX_REQUEST_BYTES", "33554432")?,

            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
        })
    }

    /// Transport settings for the extraction service
    pub fn extraction_service(&self) -> ExtractionServiceConfig {
        ExtractionServiceConfig {
            request_timeout: Duration::from_secs(self.llm_timeout_secs),
            max_retries: self.llm_max_retries,
            retry_initial_backoff: Duration::from_millis(self.llm_retry_initial_backoff_ms),
            concurrency: self.extraction_concurrency.max(1),
        }
    }
}

fn parse_var<T>(key: &str, default: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .with_context(|| format!("{} must be a valid number", key))
}
