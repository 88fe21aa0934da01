//! Validation utilities for the Crop Advisor
//!
//! The form enforces only "required" and "numeric" constraints; everything
//! else about the readings is left to the advisor model.

use std::borrow::Cow;
use std::str::FromStr;

use rust_decimal::Decimal;
use validator::ValidationError;

use crate::models::CropSuggestion;

// ============================================================================
// Form Validations
// ============================================================================

/// Field must contain something other than whitespace
pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some(Cow::Borrowed("This field is required"));
        return Err(error);
    }
    Ok(())
}

/// Field must be present and hold a number, as a `type="number"` input would
pub fn validate_numeric(value: &str) -> Result<(), ValidationError> {
    validate_required(value)?;
    if parse_reading(value).is_none() {
        let mut error = ValidationError::new("numeric");
        error.message = Some(Cow::Borrowed("Must be a number"));
        return Err(error);
    }
    Ok(())
}

// ============================================================================
// Numeric Readings
// ============================================================================

/// Interpret a raw numeric reading, accepting plain and exponent notation
pub fn parse_reading(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Render a reading for the prompt: the normalized number when it parses,
/// the trimmed text otherwise
pub fn format_reading(raw: &str) -> String {
    match parse_reading(raw) {
        Some(value) => value.normalize().to_string(),
        None => raw.trim().to_string(),
    }
}

// ============================================================================
// Suggestion Shape
// ============================================================================

/// A suggestion must carry a non-blank crop name and reason
pub fn validate_suggestion(suggestion: &CropSuggestion) -> Result<(), &'static str> {
    if suggestion.crop_name.trim().is_empty() {
        return Err("Suggestion is missing a crop name");
    }
    if suggestion.reason.trim().is_empty() {
        return Err("Suggestion is missing a reason");
    }
    Ok(())
}
