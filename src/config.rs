//! Configuration management for yt-agent.
//!
//! Configuration can be set via environment variables:
//! - `OLLAMA_URL` - Optional. Base URL of the Ollama server. Defaults to `http://localhost:11434`.
//! - `OLLAMA_MODEL` - Optional. Model identifier. Defaults to `llama3-groq-tool-use:latest`.
//! - `MAX_ITERATIONS` - Optional. Maximum tool-calling iterations per query. Defaults to `5`.
//! - `LLM_TEMPERATURE` - Optional. Sampling temperature for completions. Defaults to `0.1`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Ollama server
    pub ollama_url: String,

    /// Model identifier passed to Ollama
    pub model: String,

    /// Maximum tool-calling iterations per query
    pub max_iterations: usize,

    /// Sampling temperature for completions
    pub temperature: f32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let ollama_url = std::env::var("OLLAMA_URL")
            .unwrap_or_else(|_| "http://localhost:11434".to_string());

        let model = std::env::var("OLLAMA_MODEL")
            .unwrap_or_else(|_| "llama3-groq-tool-use:latest".to_string());

        let max_iterations = std::env::var("MAX_ITERATIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("MAX_ITERATIONS".to_string(), format!("{}", e)))?;

        let temperature = std::env::var("LLM_TEMPERATURE")
            .unwrap_or_else(|_| "0.1".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("LLM_TEMPERATURE".to_string(), format!("{}", e)))?;

        Ok(Self {
            ollama_url,
            model,
            max_iterations,
            temperature,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(ollama_url: String, model: String) -> Self {
        Self {
            ollama_url,
            model,
            max_iterations: 5,
            temperature: 0.1,
        }
    }
}
