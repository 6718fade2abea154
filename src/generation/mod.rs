// ABOUTME: Recipe generation service turning user ingredients into LLM-produced recipes
// ABOUTME: Validates requests, builds prompts, calls the provider, and parses the reply
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

//! # Recipe Generation
//!
//! [`GenerationService`] is the whole backend pipeline behind
//! `POST /api/generate`: request validation, prompt construction, one
//! upstream call, and [`ParsedOutput`] interpretation of the completion.

mod parser;

pub use parser::{parse_nutrition, strip_code_fences, ParsedOutput};

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::{GenerationConfig, LlmConfig};
use crate::constants::generation::{DEFAULT_CUISINE, DEFAULT_LANGUAGE};
use crate::constants::labels::MISSING_INGREDIENTS;
use crate::errors::{AppError, AppResult};
use crate::llm::prompts::{recipe_user_prompt, RECIPE_SYSTEM_PROMPT};
use crate::llm::{ChatMessage, ChatRequest, LlmProvider, ResponseFormat};
use crate::models::Recipe;

/// Upper bound on completion tokens for one multi-recipe request
pub const MAX_COMPLETION_TOKENS: u32 = 4096;

/// Ingredients as typed by the user, or as a list from API clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IngredientsInput {
    /// Free text, e.g. `"carrot, onion"`
    Text(String),
    /// One entry per ingredient
    List(Vec<String>),
}

impl IngredientsInput {
    /// Trimmed comma separated text
    #[must_use]
    pub fn normalized(&self) -> String {
        match self {
            Self::Text(text) => text.trim().to_owned(),
            Self::List(items) => items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Body of `POST /api/generate`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Ingredients to cook with
    #[serde(default)]
    pub ingredients: Option<IngredientsInput>,
    /// Cuisine, `any` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    /// Output language code, `en` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl GenerateRequest {
    /// Request for free-text ingredients
    #[must_use]
    pub fn new(ingredients: impl Into<String>) -> Self {
        Self {
            ingredients: Some(IngredientsInput::Text(ingredients.into())),
            ..Self::default()
        }
    }

    /// Set the cuisine
    #[must_use]
    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    /// Set the output language
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Check the request and substitute defaults
    ///
    /// # Errors
    ///
    /// Returns a `MissingRequiredField` error when ingredients are missing or blank.
    pub fn validate(&self) -> AppResult<ValidatedRequest> {
        let ingredients = self
            .ingredients
            .as_ref()
            .map(IngredientsInput::normalized)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| AppError::missing_field(MISSING_INGREDIENTS))?;

        Ok(ValidatedRequest {
            ingredients,
            cuisine: non_blank_or(self.cuisine.as_deref(), DEFAULT_CUISINE),
            language: non_blank_or(self.language.as_deref(), DEFAULT_LANGUAGE),
        })
    }
}

fn non_blank_or(value: Option<&str>, default: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_owned()
}

/// A request with non-empty ingredients and defaults filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    /// Non-empty, trimmed ingredients
    pub ingredients: String,
    /// Cuisine or `any`
    pub cuisine: String,
    /// Language code or `en`
    pub language: String,
}

/// Success body of `POST /api/generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Always `true`
    pub success: bool,
    /// Decoded recipes, empty for raw text
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    /// Completion text when it could not be decoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}

impl From<ParsedOutput> for GenerateResponse {
    fn from(output: ParsedOutput) -> Self {
        match output {
            ParsedOutput::Structured(recipes) => Self {
                success: true,
                recipes,
                raw_text: None,
            },
            ParsedOutput::RawText(text) => Self {
                success: true,
                recipes: Vec::new(),
                raw_text: Some(text),
            },
        }
    }
}

/// Sampling settings applied to every generation call
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    /// Model identifier
    pub model: String,
    /// Completion tokens per recipe
    pub max_tokens_per_recipe: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Recipes per request
    pub recipe_count: u8,
}

impl GenerationSettings {
    /// Settings from server configuration
    #[must_use]
    pub fn from_config(llm: &LlmConfig, generation: &GenerationConfig) -> Self {
        Self {
            model: llm.model.clone(),
            max_tokens_per_recipe: llm.max_tokens,
            temperature: llm.temperature,
            recipe_count: generation.recipe_count,
        }
    }

    /// Completion budget for the whole request
    #[must_use]
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens_per_recipe
            .saturating_mul(u32::from(self.recipe_count.max(1)))
            .min(MAX_COMPLETION_TOKENS)
    }
}

/// Backend recipe generation pipeline
#[derive(Clone)]
pub struct GenerationService {
    provider: Arc<dyn LlmProvider>,
    settings: GenerationSettings,
}

impl GenerationService {
    /// Create a service around a provider
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    /// Provider used for completions
    #[must_use]
    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.provider
    }

    /// Active settings
    #[must_use]
    pub const fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Chat request for a validated generation request
    #[must_use]
    pub fn build_chat_request(&self, request: &ValidatedRequest) -> ChatRequest {
        ChatRequest::new(vec![
            ChatMessage::system(RECIPE_SYSTEM_PROMPT),
            ChatMessage::user(recipe_user_prompt(
                &request.ingredients,
                &request.cuisine,
                &request.language,
                self.settings.recipe_count,
            )),
        ])
        .with_model(&self.settings.model)
        .with_max_tokens(self.settings.max_tokens())
        .with_temperature(self.settings.temperature)
        .with_response_format(ResponseFormat::JsonObject)
    }

    /// Validate, call the provider once, and interpret the completion
    ///
    /// # Errors
    ///
    /// Returns validation errors before any upstream call, and provider
    /// errors unchanged.
    #[instrument(skip(self, request), fields(provider = self.provider.name()))]
    pub async fn generate(&self, request: &GenerateRequest) -> AppResult<ParsedOutput> {
        let validated = request.validate()?;
        let chat_request = self.build_chat_request(&validated);

        let response = self.provider.complete(&chat_request).await?;
        let output = ParsedOutput::parse(&response.content);

        match &output {
            ParsedOutput::Structured(recipes) => info!(
                recipes = recipes.len(),
                cuisine = %validated.cuisine,
                language = %validated.language,
                "Generated recipes"
            ),
            ParsedOutput::RawText(text) => info!(
                chars = text.len(),
                "Completion was not structured, returning raw text"
            ),
        }
        Ok(output)
    }
}
