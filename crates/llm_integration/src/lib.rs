use async_trait::async_trait;
use thiserror::Error;

pub mod gemini;
pub mod groq;

pub use gemini::{GeminiConfig, GeminiProvider};
pub use groq::{GroqConfig, GroqProvider};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider misconfigured: {0}")]
    Configuration(String),
    #[error("provider request failed: {0}")]
    Transport(String),
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("provider response was not understood: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        ProviderError::Configuration(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        ProviderError::Transport(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        ProviderError::InvalidResponse(msg.into())
    }
}

/// Produces the raw completion text the idea list is parsed from.
#[async_trait]
pub trait IdeaProvider: Send + Sync {
    async fn complete_ideas(&self, prompt: &str) -> Result<String, ProviderError>;
    fn model_name(&self) -> &str;
}

/// Produces a full script for a single idea.
#[async_trait]
pub trait ScriptProvider: Send + Sync {
    async fn complete_script(&self, prompt: &str) -> Result<String, ProviderError>;
    fn model_name(&self) -> &str;
}

fn require_non_empty(value: &str, what: &str) -> Result<(), ProviderError> {
    if value.trim().is_empty() {
        return Err(ProviderError::configuration(format!("{what} is required")));
    }
    Ok(())
}

async fn read_error_body(response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ProviderError::Status { status, body }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
