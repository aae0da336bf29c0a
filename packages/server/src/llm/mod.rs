//! Generative model access: the provider capability, the Gemini REST client
//! and the retrying [`ResponseGenerator`] wrapped around it.

mod gemini;
mod generator;

use async_trait::async_trait;
use thiserror::Error;

pub use gemini::GeminiClient;
pub use generator::ResponseGenerator;

/// Failure of a single model call, classified for the retry loop.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelCallError {
    #[error("rate limited: {0}")]
    RateLimited(String),
    /// Bad credentials or arguments. Never retried.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("{0}")]
    Other(String),
}

/// A text-in, text-out generative model.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate_content(&self, prompt: &str) -> Result<String, ModelCallError>;
}

/// Final outcome of [`ResponseGenerator::generate`] when no text was produced.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Rate limit exceeded after {attempts} attempts")]
    RateLimitExceeded { attempts: u32 },
    #[error("Model request timed out after {attempts} attempts")]
    Timeout { attempts: u32 },
    #[error("Model error: {0}")]
    Model(String),
}
