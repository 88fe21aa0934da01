//! Crop suggestion models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single recommended crop with the reason it suits the conditions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CropSuggestion {
    /// Common name of the crop
    pub crop_name: String,
    pub reason: String,
}

impl CropSuggestion {
    pub fn new(crop_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            crop_name: crop_name.into(),
            reason: reason.into(),
        }
    }

    /// Placeholder photo for the crop card, seeded by the crop name
    pub fn image_url(&self) -> String {
        let seed: String = self
            .crop_name
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        format!("https://picsum.photos/seed/{}/400/200", seed)
    }
}

/// Successful recommendation payload returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub request_id: Uuid,
    pub model: String,
    pub suggestions: Vec<CropSuggestion>,
    pub generated_at: DateTime<Utc>,
}
