//! Gemini API client
//!
//! Calls the Generative Language `generateContent` endpoint with a JSON
//! response schema and returns the text of the first candidate.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{CompletionBackend, CompletionError, CompletionRequest};
use crate::config::GeminiConfig;

/// Client for the Gemini generative model API
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

/// `generateContent` request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a serde_json::Value,
}

/// `generateContent` response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GeminiClient {
    /// Create a new Gemini client from explicit configuration
    pub fn new(config: &GeminiConfig) -> Result<Self, CompletionError> {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| CompletionError::RequestFailed(format!("HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl CompletionBackend for GeminiClient {
    async fn generate(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: &request.response_mime_type,
                response_schema: &request.response_schema,
            },
        };

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CompletionError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let data: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::ParseError(e.to_string()))?;

        extract_text(data)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Concatenate the text parts of the first candidate
fn extract_text(data: GenerateContentResponse) -> Result<String, CompletionError> {
    let Some(candidate) = data.candidates.into_iter().next() else {
        return match data.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => Err(CompletionError::Blocked(reason)),
            None => Err(CompletionError::NoCandidates),
        };
    };

    if let Some(reason) = &candidate.finish_reason {
        tracing::debug!(finish_reason = %reason, "Gemini candidate finished");
    }

    Ok(candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_extract_joins_parts() {
        let data = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"[{\"cropName\":"},{"text":"\"Rice\"}]"}]},"finishReason":"STOP"}]}"#,
        );
        assert_eq!(extract_text(data).unwrap(), r#"[{"cropName":"Rice"}]"#);
    }

    #[test]
    fn test_extract_missing_content_is_empty() {
        let data = parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#);
        assert_eq!(extract_text(data).unwrap(), "");
    }

    #[test]
    fn test_extract_blocked_prompt() {
        let data = parse(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        assert!(matches!(extract_text(data), Err(CompletionError::Blocked(r)) if r == "SAFETY"));
    }

    #[test]
    fn test_extract_no_candidates() {
        let data = parse("{}");
        assert!(matches!(extract_text(data), Err(CompletionError::NoCandidates)));
    }

    #[test]
    fn test_endpoint_uses_model() {
        let mut config = GeminiConfig::new("key");
        config.base_url = "http://localhost:9999/v1beta/".to_string();
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let schema = serde_json::json!({"type": "ARRAY"});
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: "hello" }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &schema,
            },
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(json["generationConfig"]["responseSchema"]["type"], "ARRAY");
    }
}
