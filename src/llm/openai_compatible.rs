// ABOUTME: OpenAI-compatible chat-completions provider with OpenRouter defaults
// ABOUTME: Handles JSON response mode, bearer auth, and upstream error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

//! # `OpenAI`-Compatible Provider
//!
//! Works with any endpoint that implements `POST {base_url}/chat/completions`:
//! OpenRouter (the default), Ollama, vLLM, or `LocalAI`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use spicesync::config::LlmConfig;
//! use spicesync::llm::{ChatMessage, ChatRequest, LlmProvider, OpenAiCompatibleProvider};
//! use spicesync::errors::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let provider = OpenAiCompatibleProvider::from_llm_config(&LlmConfig::default())?;
//!     let request = ChatRequest::new(vec![ChatMessage::user("Name a soup.")]);
//!     let response = provider.complete(&request).await?;
//!     println!("{}", response.content);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

use super::{
    ChatMessage, ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, MessageRole,
    ResponseFormat, TokenUsage, NO_COMPLETION,
};
use crate::config::LlmConfig;
use crate::errors::{AppError, ErrorCode};

/// Connection timeout
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Longest body excerpt kept in error messages
const ERROR_BODY_EXCERPT: usize = 200;

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<OpenAiResponseFormat>,
}

#[derive(Debug, Serialize)]
struct OpenAiResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct OpenAiMessage {
    role: &'static str,
    content: String,
}

impl From<&ChatMessage> for OpenAiMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str(),
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

/// Some routers return an already-decoded object when JSON mode is on
#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    #[serde(default)]
    content: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    #[serde(rename = "prompt_tokens")]
    prompt: u32,
    #[serde(rename = "completion_tokens")]
    completion: u32,
    #[serde(rename = "total_tokens")]
    total: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

/// Where and how to reach the chat-completions endpoint
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL for the API (e.g., <https://openrouter.ai/api/v1>)
    pub base_url: String,
    /// Bearer token; OpenRouter rejects requests without one
    pub api_key: Option<String>,
    /// `LLM_MODEL`, used when a request names no model
    pub default_model: String,
    /// Whole-request timeout
    pub request_timeout: Duration,
    /// Request features to use
    pub capabilities: LlmCapabilities,
}

impl OpenAiCompatibleConfig {
    /// Build from the server's LLM settings
    #[must_use]
    pub fn from_llm_config(config: &LlmConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            default_model: config.model.clone(),
            request_timeout: Duration::from_secs(config.timeout_secs),
            capabilities: LlmCapabilities::hosted(),
        }
    }

    fn is_openrouter(&self) -> bool {
        self.base_url.contains("openrouter.ai")
    }
}

/// Recipe completions over `/chat/completions`
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Provider with its own pooled HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Create a provider from the server's LLM settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_llm_config(config: &LlmConfig) -> Result<Self, AppError> {
        Self::new(OpenAiCompatibleConfig::from_llm_config(config))
    }

    /// `{base_url}/{endpoint}` without a doubled slash
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    fn add_auth_header(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(ref api_key) = self.config.api_key {
            request.header("Authorization", format!("Bearer {api_key}"))
        } else {
            request
        }
    }

    fn build_request(&self, request: &ChatRequest) -> OpenAiRequest {
        let response_format = request
            .response_format
            .filter(|_| self.config.capabilities.supports_json_mode())
            .and_then(|format| match format {
                ResponseFormat::JsonObject => Some(OpenAiResponseFormat {
                    format_type: "json_object",
                }),
                ResponseFormat::Text => None,
            });

        OpenAiRequest {
            model: request
                .model
                .clone()
                .unwrap_or_else(|| self.config.default_model.clone()),
            messages: self.wire_messages(&request.messages),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format,
        }
    }

    /// Endpoints without a system role get the instructions prepended to
    /// the first user message
    fn wire_messages(&self, messages: &[ChatMessage]) -> Vec<OpenAiMessage> {
        if self.config.capabilities.supports_system_messages() {
            return messages.iter().map(OpenAiMessage::from).collect();
        }

        let (system, rest): (Vec<_>, Vec<_>) = messages
            .iter()
            .partition(|message| message.role == MessageRole::System);
        let preamble = system
            .iter()
            .map(|message| message.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        rest.into_iter()
            .enumerate()
            .map(|(index, message)| {
                let mut wire = OpenAiMessage::from(message);
                if index == 0 && !preamble.is_empty() {
                    wire.content = format!("{preamble}\n\n{}", wire.content);
                }
                wire
            })
            .collect()
    }

    /// Map a transport failure
    fn send_error(&self, e: &reqwest::Error) -> AppError {
        error!("Failed to send request to {}: {e}", self.display_name());
        if e.is_timeout() {
            AppError::external_unavailable(
                self.display_name(),
                format!(
                    "request timed out after {}s",
                    self.config.request_timeout.as_secs()
                ),
            )
        } else if e.is_connect() {
            AppError::external_unavailable(
                self.display_name(),
                format!("cannot connect to {}", self.config.base_url),
            )
        } else {
            AppError::external_service(self.display_name(), format!("Failed to connect: {e}"))
        }
    }

    /// Map a non-success upstream status onto an error that keeps the payload
    fn parse_error_response(&self, status: StatusCode, body: &str) -> AppError {
        let payload: Value = serde_json::from_str(body).unwrap_or_else(|_| {
            Value::String(body.chars().take(ERROR_BODY_EXCERPT).collect())
        });
        let upstream_message = serde_json::from_str::<OpenAiErrorResponse>(body)
            .map(|response| response.error.message)
            .ok();

        let code = match status.as_u16() {
            401 | 403 => ErrorCode::ExternalAuthFailed,
            429 => ErrorCode::ExternalRateLimited,
            502..=504 => ErrorCode::ExternalServiceUnavailable,
            _ => ErrorCode::ExternalServiceError,
        };

        let message = match (code, upstream_message) {
            (ErrorCode::ExternalRateLimited, Some(message)) => Self::rate_limit_message(&message),
            (ErrorCode::ExternalRateLimited, None) => Self::rate_limit_message(""),
            (_, Some(message)) => format!("{} request failed: {message}", self.display_name()),
            (_, None) => format!("{} request failed", self.display_name()),
        };

        warn!(status = %status, "Upstream chat completion failed");
        AppError::new(code, message).with_details(json!({
            "upstream_status": status.as_u16(),
            "upstream_body": payload,
        }))
    }

    /// User-friendly rate limit message, keeping a retry hint when present
    fn rate_limit_message(message: &str) -> String {
        let lowered = message.to_lowercase();
        if let Some(retry_pos) = lowered.find("try again in ") {
            let after_prefix = &lowered[retry_pos + "try again in ".len()..];
            let number: String = after_prefix
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            if let Ok(seconds) = number.parse::<f64>() {
                let seconds_int = seconds.ceil() as u64;
                return format!("LLM rate limit reached. Please try again in {seconds_int} seconds.");
            }
        }
        "LLM rate limit reached. Please wait a moment and try again.".to_owned()
    }

    /// Extract the completion text; an object content is re-serialized
    fn content_text(content: Option<Value>) -> Option<String> {
        match content? {
            Value::Null => None,
            Value::String(text) => Some(text),
            other => Some(other.to_string()),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        if self.config.is_openrouter() {
            "openrouter"
        } else {
            "local"
        }
    }

    fn display_name(&self) -> &'static str {
        if self.config.is_openrouter() {
            "OpenRouter"
        } else {
            "Local LLM"
        }
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.config.capabilities
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.config.default_model)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let openai_request = self.build_request(request);
        debug!(
            messages = openai_request.messages.len(),
            json_mode = openai_request.response_format.is_some(),
            "Sending chat completion request to {}",
            self.name()
        );

        let http_request = self
            .client
            .post(self.api_url("chat/completions"))
            .header("Content-Type", "application/json")
            .json(&openai_request);

        let response = self
            .add_auth_header(http_request)
            .send()
            .await
            .map_err(|e| self.send_error(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read API response: {e}");
            AppError::external_service(self.display_name(), format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(self.parse_error_response(status, &body));
        }

        let openai_response: OpenAiResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse API response: {e}");
            AppError::external_service(self.display_name(), format!("Failed to parse response: {e}"))
        })?;

        let raw_payload = || serde_json::from_str::<Value>(&body).unwrap_or(Value::Null);
        let Some(choice) = openai_response.choices.into_iter().next() else {
            return Err(AppError::internal(NO_COMPLETION).with_details(raw_payload()));
        };
        let Some(content) = Self::content_text(choice.message.content) else {
            return Err(AppError::internal(NO_COMPLETION).with_details(raw_payload()));
        };

        debug!(
            "Received response from {}: {} chars, finish_reason: {:?}",
            self.name(),
            content.len(),
            choice.finish_reason
        );

        Ok(ChatResponse {
            content,
            model: openai_response
                .model
                .unwrap_or_else(|| openai_request.model.clone()),
            usage: openai_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt,
                completion_tokens: u.completion,
                total_tokens: u.total,
            }),
            finish_reason: choice.finish_reason,
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, AppError> {
        let http_request = self.client.get(self.api_url("models"));
        let response = self
            .add_auth_header(http_request)
            .send()
            .await
            .map_err(|e| self.send_error(&e))?;

        let healthy = response.status().is_success();
        if !healthy {
            warn!(
                "{} health check failed with status: {}",
                self.name(),
                response.status()
            );
        }
        Ok(healthy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatMessage;

    fn provider(base_url: &str) -> OpenAiCompatibleProvider {
        let config = LlmConfig {
            base_url: base_url.to_owned(),
            api_key: Some("sk-test".to_owned()),
            ..LlmConfig::default()
        };
        OpenAiCompatibleProvider::from_llm_config(&config).unwrap()
    }

    #[test]
    fn test_api_url_joins_without_double_slash() {
        let provider = provider("https://openrouter.ai/api/v1/");
        assert_eq!(
            provider.api_url("chat/completions"),
            "https://openrouter.ai/api/v1/chat/completions"
        );
        assert_eq!(provider.name(), "openrouter");
    }

    #[test]
    fn test_request_uses_json_mode_and_default_model() {
        let provider = provider("https://openrouter.ai/api/v1");
        let request = ChatRequest::new(vec![ChatMessage::user("hi")])
            .with_max_tokens(800)
            .with_response_format(ResponseFormat::JsonObject);

        let body = serde_json::to_value(provider.build_request(&request)).unwrap();
        assert_eq!(body["model"], "openai/gpt-oss-20b:free");
        assert_eq!(body["response_format"]["type"], "json_object");
        assert_eq!(body["max_tokens"], 800);
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_system_prompt_folded_without_system_role() {
        let mut provider = provider("http://localhost:8080/v1");
        provider.config.capabilities = LlmCapabilities::JSON_MODE;
        let request = ChatRequest::new(vec![
            ChatMessage::system("Reply in JSON."),
            ChatMessage::user("Ingredients: rice"),
        ]);

        let body = serde_json::to_value(provider.build_request(&request)).unwrap();
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[0]["content"], "Reply in JSON.\n\nIngredients: rice");
    }

    #[test]
    fn test_error_mapping_keeps_upstream_payload() {
        let provider = provider("https://openrouter.ai/api/v1");
        let error = provider.parse_error_response(
            StatusCode::UNAUTHORIZED,
            r#"{"error":{"message":"No auth credentials found","code":401}}"#,
        );

        assert_eq!(error.code, ErrorCode::ExternalAuthFailed);
        assert_eq!(
            error.message,
            "OpenRouter request failed: No auth credentials found"
        );
        let details = error.details.unwrap();
        assert_eq!(details["upstream_status"], 401);
        assert_eq!(
            details["upstream_body"]["error"]["message"],
            "No auth credentials found"
        );
    }

    #[test]
    fn test_non_json_gateway_error() {
        let provider = provider("http://localhost:11434/v1");
        let error = provider.parse_error_response(StatusCode::BAD_GATEWAY, "<html>bad</html>");
        assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
        assert_eq!(error.message, "Local LLM request failed");
    }

    #[test]
    fn test_rate_limit_message_keeps_retry_hint() {
        assert_eq!(
            OpenAiCompatibleProvider::rate_limit_message("Please try again in 2.5s"),
            "LLM rate limit reached. Please try again in 3 seconds."
        );
        assert!(OpenAiCompatibleProvider::rate_limit_message("slow down").contains("wait a moment"));
    }

    #[test]
    fn test_object_content_is_reserialized() {
        let content = OpenAiCompatibleProvider::content_text(Some(serde_json::json!({"recipes": []})));
        assert_eq!(content.as_deref(), Some(r#"{"recipes":[]}"#));
        assert_eq!(OpenAiCompatibleProvider::content_text(Some(Value::Null)), None);
    }
}
