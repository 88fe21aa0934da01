//! HTTP handlers for the Crop Advisor API

pub mod health;
pub mod recommendation;

pub use health::health_check;
pub use recommendation::{default_conditions, list_soil_types, recommend_crops};
