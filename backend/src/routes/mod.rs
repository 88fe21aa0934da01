//! Route definitions for the Crop Advisor API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/soil-types", get(handlers::list_soil_types))
        .route("/conditions/defaults", get(handlers::default_conditions))
        .route("/recommendations", post(handlers::recommend_crops))
}
