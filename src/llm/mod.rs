// ABOUTME: LLM provider abstraction layer for chat-completion backed recipe generation
// ABOUTME: Defines the provider contract, message types, and capability flags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

//! # LLM Provider Interface
//!
//! The backend never talks to a model vendor directly. It builds a
//! [`ChatRequest`] and hands it to an [`LlmProvider`]; the provider owns the
//! wire format, authentication, and the mapping of upstream failures onto
//! [`AppError`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use spicesync::llm::{ChatMessage, ChatRequest, LlmProvider, ResponseFormat};
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let request = ChatRequest::new(vec![
//!         ChatMessage::system("You are a concise recipe assistant."),
//!         ChatMessage::user("Suggest a soup with carrots."),
//!     ])
//!     .with_response_format(ResponseFormat::JsonObject);
//!     let response = provider.complete(&request).await;
//! }
//! ```

mod openai_compatible;
pub mod prompts;

pub use openai_compatible::{OpenAiCompatibleConfig, OpenAiCompatibleProvider};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Message used when the upstream answered without any completion
pub const NO_COMPLETION: &str = "No completion returned";

bitflags::bitflags! {
    /// Request features an endpoint understands
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LlmCapabilities: u8 {
        /// Honors `response_format: json_object`
        const JSON_MODE = 0b0000_0001;
        /// Accepts a separate `system` role
        const SYSTEM_MESSAGES = 0b0000_0010;
    }
}

impl LlmCapabilities {
    /// Everything OpenRouter and the common local servers accept
    #[must_use]
    pub const fn hosted() -> Self {
        Self::JSON_MODE.union(Self::SYSTEM_MESSAGES)
    }

    /// JSON mode flag set
    #[must_use]
    pub const fn supports_json_mode(&self) -> bool {
        self.contains(Self::JSON_MODE)
    }

    /// System role flag set
    #[must_use]
    pub const fn supports_system_messages(&self) -> bool {
        self.contains(Self::SYSTEM_MESSAGES)
    }
}

/// Who wrote a prompt message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Cooking instructions and output schema
    System,
    /// The ingredient list
    User,
}

impl MessageRole {
    /// Wire name of the role
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

/// One prompt message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author
    pub role: MessageRole,
    /// Text
    pub content: String,
}

impl ChatMessage {
    /// Message from a role and text
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Instruction message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Ingredient message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }
}

/// Output constraint requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseFormat {
    /// Free text
    Text,
    /// A single JSON object
    JsonObject,
}

/// Provider-neutral completion request
///
/// Unset fields fall back to the provider's defaults; `model` in particular
/// is normally left to the configured `LLM_MODEL`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Prompt, system message first
    pub messages: Vec<ChatMessage>,
    /// Model override
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Completion budget, scaled with the recipe count by the caller
    pub max_tokens: Option<u32>,
    /// Output constraint
    pub response_format: Option<ResponseFormat>,
}

impl ChatRequest {
    /// Request with provider defaults for everything but the prompt
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            model: None,
            temperature: None,
            max_tokens: None,
            response_format: None,
        }
    }

    /// Override the configured model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the sampling temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the completion budget
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Constrain the output format
    #[must_use]
    pub const fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }
}

/// First completion of an upstream answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Completion text; JSON objects returned by the router are re-serialized
    pub content: String,
    /// Model that actually answered, which routers may substitute
    pub model: String,
    /// Token accounting, when reported
    pub usage: Option<TokenUsage>,
    /// `length` means the recipe JSON was probably cut off
    pub finish_reason: Option<String>,
}

/// Token accounting reported by the upstream
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt side
    pub prompt_tokens: u32,
    /// Completion side
    pub completion_tokens: u32,
    /// Sum of both
    pub total_tokens: u32,
}

/// A chat-completion backend
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short identifier reported by `/ready`, such as `openrouter`
    fn name(&self) -> &'static str;

    /// Name used in user-facing error messages
    fn display_name(&self) -> &'static str;

    /// Request features the endpoint accepts
    fn capabilities(&self) -> LlmCapabilities;

    /// Model used when the request leaves `model` unset
    fn default_model(&self) -> &str;

    /// Run one completion
    ///
    /// An upstream answer without any choice is reported as an internal
    /// error carrying [`NO_COMPLETION`].
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError>;

    /// Whether the endpoint answers and accepts the configured key
    async fn health_check(&self) -> Result<bool, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hosted_capabilities() {
        let caps = LlmCapabilities::hosted();
        assert!(caps.supports_json_mode());
        assert!(caps.supports_system_messages());
        assert!(!LlmCapabilities::JSON_MODE.supports_system_messages());
        assert!(!LlmCapabilities::empty().supports_json_mode());
    }

    #[test]
    fn test_request_builder() {
        let request = ChatRequest::new(vec![ChatMessage::user("hi")])
            .with_model("m")
            .with_temperature(0.7)
            .with_max_tokens(800)
            .with_response_format(ResponseFormat::JsonObject);

        assert_eq!(request.model.as_deref(), Some("m"));
        assert_eq!(request.max_tokens, Some(800));
        assert_eq!(request.response_format, Some(ResponseFormat::JsonObject));
        assert_eq!(request.messages[0].role.as_str(), "user");
    }
}
