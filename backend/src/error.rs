//! Error handling for the Crop Advisor server
//!
//! Every error becomes a JSON [`ErrorResponse`]. Failure details are logged;
//! recommendation failures reach the client only as a fixed message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{ConditionsError, ErrorResponse, ERROR_MESSAGE};
use thiserror::Error;

use crate::services::RecommendationFetchError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    // External service errors
    #[error(transparent)]
    RecommendationFetch(#[from] RecommendationFetchError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<ConditionsError> for AppError {
    fn from(err: ConditionsError) -> Self {
        let field = err
            .field()
            .map(|f| f.to_string())
            .unwrap_or_else(|| "conditions".to_string());
        let message = match &err {
            ConditionsError::Invalid { message, .. } => message.clone(),
            other => other.to_string(),
        };
        AppError::Validation { field, message }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("VALIDATION_ERROR", message.clone()).with_field(field.clone()),
            ),
            AppError::RecommendationFetch(_) => (
                StatusCode::BAD_GATEWAY,
                ErrorResponse::new("RECOMMENDATION_FETCH_ERROR", ERROR_MESSAGE),
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("CONFIGURATION_ERROR", format!("Configuration error: {}", msg)),
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
