// ABOUTME: Scripted LLM provider for route and client tests
// ABOUTME: Replays a fixed completion or failure and records every request it receives

use async_trait::async_trait;
use serde_json::json;
use spicesync::{
    errors::{AppError, ErrorCode},
    llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, NO_COMPLETION},
};
use std::sync::{Arc, Mutex};

/// What the stub answers with
#[derive(Debug, Clone)]
pub enum StubReply {
    /// A completion with this content
    Content(String),
    /// Upstream answered without choices
    NoCompletion,
    /// Upstream rejected the API key
    Unauthorized,
}

/// LLM provider answering every request with the same reply
pub struct StubProvider {
    reply: StubReply,
    requests: Mutex<Vec<ChatRequest>>,
}

impl StubProvider {
    pub fn new(reply: StubReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Provider answering with `content`
    pub fn content(content: &str) -> Arc<Self> {
        Self::new(StubReply::Content(content.to_owned()))
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn display_name(&self) -> &'static str {
        "Stub LLM"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::hosted()
    }

    fn default_model(&self) -> &str {
        "stub-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            StubReply::Content(content) => Ok(ChatResponse {
                content: content.clone(),
                model: "stub-model".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            }),
            StubReply::NoCompletion => Err(AppError::internal(NO_COMPLETION)),
            StubReply::Unauthorized => Err(AppError::new(
                ErrorCode::ExternalAuthFailed,
                "Stub LLM request failed: invalid api key",
            )
            .with_details(json!({
                "upstream_status": 401,
                "upstream_body": {"error": {"message": "invalid api key"}}
            }))),
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}
