//! HTTP handlers for crop recommendation endpoints

use axum::{extract::State, Json};
use chrono::Utc;
use shared::{FarmConditions, RecommendationResponse, SoilType};
use uuid::Uuid;

use crate::error::AppResult;
use crate::AppState;

/// Get crop recommendations for a set of farm conditions
pub async fn recommend_crops(
    State(state): State<AppState>,
    Json(conditions): Json<FarmConditions>,
) -> AppResult<Json<RecommendationResponse>> {
    conditions.check()?;

    let request_id = Uuid::new_v4();
    let suggestions = state
        .recommendations
        .recommend_with_id(request_id, &conditions)
        .await?;

    Ok(Json(RecommendationResponse {
        request_id,
        model: state.recommendations.model().to_string(),
        suggestions,
        generated_at: Utc::now(),
    }))
}

/// List the soil types offered by the form
pub async fn list_soil_types() -> Json<Vec<SoilType>> {
    Json(SoilType::ALL.to_vec())
}

/// Initial form values
pub async fn default_conditions() -> Json<FarmConditions> {
    Json(FarmConditions::default())
}
