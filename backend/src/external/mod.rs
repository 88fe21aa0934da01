//! External API integrations
//!
//! The recommendation client talks to a [`CompletionBackend`]; the production
//! backend is [`GeminiClient`], tests substitute their own.

pub mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Failure while talking to a generative completion service
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("API returned {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Prompt was blocked: {0}")]
    Blocked(String),

    #[error("Response contained no candidates")]
    NoCandidates,
}

/// One prompt plus the structured-output directive for the reply
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub prompt: String,
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
}

/// A generative text/JSON completion service.
///
/// Implementations hold no per-call state and may be shared across requests.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Issue a single completion call and return the model's raw text
    async fn generate(&self, request: &CompletionRequest) -> Result<String, CompletionError>;

    /// Provider name, for logs
    fn provider_name(&self) -> &'static str;

    /// Model identifier used for calls
    fn model_name(&self) -> &str;
}
