//! Business logic services for the Crop Advisor

pub mod prompt;
pub mod recommendation;

pub use recommendation::{RecommendationClient, RecommendationFetchError};
