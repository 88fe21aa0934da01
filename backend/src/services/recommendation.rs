//! Recommendation client
//!
//! Turns farm conditions into one completion call and the model's reply into
//! a list of crop suggestions. Every failure collapses into a single
//! [`RecommendationFetchError`]; the detail goes to the log only.

use std::sync::Arc;

use shared::{validate_suggestion, CropSuggestion, FarmConditions};
use thiserror::Error;
use uuid::Uuid;

use super::prompt;
use crate::config::GeminiConfig;
use crate::external::{CompletionBackend, CompletionError, GeminiClient};

/// The one error kind the recommendation client exposes
#[derive(Debug, Error)]
#[error("Failed to fetch crop recommendations from the AI model.")]
pub struct RecommendationFetchError {
    #[source]
    cause: FetchCause,
}

/// What actually went wrong. Kept for logs and tests, not for callers.
#[derive(Debug, Error)]
pub(crate) enum FetchCause {
    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("API returned an empty response.")]
    EmptyResponse,

    #[error("Response is not a JSON array of suggestions: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Suggestion {index} is invalid: {message}")]
    InvalidSuggestion { index: usize, message: &'static str },
}

impl RecommendationFetchError {
    fn new(cause: FetchCause) -> Self {
        Self { cause }
    }
}

/// Client for crop recommendations from a generative model
#[derive(Clone)]
pub struct RecommendationClient {
    backend: Arc<dyn CompletionBackend>,
}

impl RecommendationClient {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// Build a client over Gemini. The credential and model id come from `config`.
    pub fn from_config(config: &GeminiConfig) -> Result<Self, CompletionError> {
        Ok(Self::new(Arc::new(GeminiClient::new(config)?)))
    }

    /// Model identifier used for calls
    pub fn model(&self) -> &str {
        self.backend.model_name()
    }

    /// Ask the model for crop suggestions. Either every element of the reply
    /// is well formed or the whole call fails.
    pub async fn recommend(
        &self,
        conditions: &FarmConditions,
    ) -> Result<Vec<CropSuggestion>, RecommendationFetchError> {
        self.recommend_with_id(Uuid::new_v4(), conditions).await
    }

    /// Same as [`recommend`](Self::recommend), tagging log lines with `request_id`
    pub async fn recommend_with_id(
        &self,
        request_id: Uuid,
        conditions: &FarmConditions,
    ) -> Result<Vec<CropSuggestion>, RecommendationFetchError> {
        tracing::info!(
            %request_id,
            provider = self.backend.provider_name(),
            model = self.backend.model_name(),
            soil_type = %conditions.soil_type,
            "Requesting crop recommendations"
        );

        match self.fetch(conditions).await {
            Ok(suggestions) => {
                tracing::info!(%request_id, count = suggestions.len(), "Parsed crop suggestions");
                Ok(suggestions)
            }
            Err(cause) => {
                tracing::error!(%request_id, error = %cause, "Error calling completion API");
                Err(RecommendationFetchError::new(cause))
            }
        }
    }

    async fn fetch(&self, conditions: &FarmConditions) -> Result<Vec<CropSuggestion>, FetchCause> {
        let request = prompt::build_request(conditions);
        let raw = self.backend.generate(&request).await?;
        tracing::debug!(raw = %raw, "Raw completion output");
        parse_suggestions(&raw)
    }
}

/// Parse the trimmed reply as a JSON array and check every element's shape
pub(crate) fn parse_suggestions(raw: &str) -> Result<Vec<CropSuggestion>, FetchCause> {
    let json = raw.trim();
    if json.is_empty() {
        return Err(FetchCause::EmptyResponse);
    }

    let suggestions: Vec<CropSuggestion> = serde_json::from_str(json)?;
    for (index, suggestion) in suggestions.iter().enumerate() {
        validate_suggestion(suggestion)
            .map_err(|message| FetchCause::InvalidSuggestion { index, message })?;
    }

    Ok(suggestions)
}
