//! Prompt and response schema for crop recommendations

use serde_json::json;
use shared::{format_reading, FarmConditions};

use crate::external::CompletionRequest;

pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// Number of crops the advisor is asked for. Not enforced on the reply.
pub const REQUESTED_CROPS: usize = 3;

/// Natural-language instruction embedding the five conditions
pub fn recommendation_prompt(conditions: &FarmConditions) -> String {
    format!(
        "You are an expert agricultural advisor. Based on the following farm conditions, \
recommend the top {count} most suitable crops to plant.\n\
For each crop, provide a brief, compelling reason why it is a good choice given these \
specific conditions.\n\n\
Conditions:\n\
- Soil Type: {soil}\n\
- Average Temperature: {temperature}°C\n\
- Annual Rainfall: {rainfall} mm\n\
- Soil pH: {ph}\n\
- Geographical Region/Climate: {region}\n\n\
Provide your response in a structured JSON format according to the provided schema.",
        count = REQUESTED_CROPS,
        soil = conditions.soil_type,
        temperature = format_reading(&conditions.temperature),
        rainfall = format_reading(&conditions.rainfall),
        ph = format_reading(&conditions.ph),
        region = conditions.region.trim(),
    )
}

/// Output directive: an array of `{cropName, reason}` objects, both required strings
pub fn response_schema() -> serde_json::Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "cropName": {
                    "type": "STRING",
                    "description": "The common name of the recommended crop."
                },
                "reason": {
                    "type": "STRING",
                    "description": "A brief explanation of why this crop is suitable for the given conditions."
                }
            },
            "required": ["cropName", "reason"]
        }
    })
}

/// Full completion request for a set of conditions
pub fn build_request(conditions: &FarmConditions) -> CompletionRequest {
    CompletionRequest {
        prompt: recommendation_prompt(conditions),
        response_mime_type: RESPONSE_MIME_TYPE.to_string(),
        response_schema: response_schema(),
    }
}
