//! LLM backend abstraction.
//!
//! The agent treats the model as an opaque text-in/text-out function. Anything
//! that can turn a prompt into a reply can drive the loop; the shipped
//! implementation talks to a local Ollama server.

mod ollama;

pub use ollama::OllamaClient;

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by the model backend.
///
/// These are the only errors that propagate out of an agent run: there is no
/// defined recovery from a dead backend.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Backend returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Backend unreachable: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),
}

/// A synchronous-in-spirit completion backend: one prompt in, one reply out.
///
/// No streaming, no message roles. The whole conversation is rendered into the
/// prompt string by the caller.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one prompt and return the raw completion text.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}
