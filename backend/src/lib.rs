//! Crop Advisor - Backend Server
//!
//! Collects farm conditions, asks a generative model for suitable crops and
//! returns the suggestions as JSON. The model credential stays on the server.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use crate::error::{AppError, AppResult};
use crate::external::CompletionBackend;
use crate::services::RecommendationClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub recommendations: Arc<RecommendationClient>,
}

impl AppState {
    /// Wire the Gemini backend from configuration
    pub fn from_config(config: Config) -> AppResult<Self> {
        let recommendations = RecommendationClient::from_config(&config.gemini)
            .map_err(|e| AppError::Configuration(e.to_string()))?;
        Ok(Self {
            config: Arc::new(config),
            recommendations: Arc::new(recommendations),
        })
    }

    /// Build state around any completion backend
    pub fn with_backend(config: Config, backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            config: Arc::new(config),
            recommendations: Arc::new(RecommendationClient::new(backend)),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "AI Crop Advisor API v1.0"
}
