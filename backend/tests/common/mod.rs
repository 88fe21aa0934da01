//! Test helpers shared by the integration suites

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use crop_advisor_backend::config::{Config, GeminiConfig, ServerConfig};
use crop_advisor_backend::external::{CompletionBackend, CompletionError, CompletionRequest};
use crop_advisor_backend::services::RecommendationClient;

/// Completion backend that replays scripted replies and records every request
#[derive(Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String, CompletionError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedBackend {
    pub fn replying(body: &str) -> Arc<Self> {
        let backend = Self::default();
        backend.push_reply(body);
        Arc::new(backend)
    }

    pub fn failing(error: CompletionError) -> Arc<Self> {
        let backend = Self::default();
        backend.replies.lock().unwrap().push_back(Err(error));
        Arc::new(backend)
    }

    pub fn push_reply(&self, body: &str) {
        self.replies.lock().unwrap().push_back(Ok(body.to_string()));
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn generate(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CompletionError::RequestFailed("no scripted reply".into())))
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

pub fn client_for(backend: Arc<ScriptedBackend>) -> RecommendationClient {
    RecommendationClient::new(backend)
}

pub fn test_config() -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig::default(),
        gemini: GeminiConfig::new("test-key"),
    }
}
