// ABOUTME: Nutrition estimation for recipes that arrive without nutrition facts
// ABOUTME: Defines the estimator seam and its LLM-backed implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

//! # Nutrition Estimation
//!
//! Values are always absolute for the whole recipe; the nutrition panel
//! divides by the serving count when showing per-serving figures.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::error::Error as StdError;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::constants::labels::MISSING_INGREDIENTS;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::generation::{parse_nutrition, GenerationSettings};
use crate::llm::prompts::{nutrition_user_prompt, NUTRITION_SYSTEM_PROMPT};
use crate::llm::{ChatMessage, ChatRequest, LlmProvider, ResponseFormat};
use crate::models::{Nutrition, Recipe};

/// Completion budget for a nutrition estimate
const NUTRITION_MAX_TOKENS: u32 = 200;

/// Sampling temperature for estimates; low keeps numbers stable
const NUTRITION_TEMPERATURE: f32 = 0.2;

/// Success body of `POST /api/nutrition`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionResponse {
    /// Always `true`
    pub success: bool,
    /// Whole-recipe estimate
    pub nutrition: Nutrition,
}

impl NutritionResponse {
    /// Wrap an estimate
    #[must_use]
    pub const fn new(nutrition: Nutrition) -> Self {
        Self {
            success: true,
            nutrition,
        }
    }
}

/// Something that can estimate whole-recipe nutrition
#[async_trait]
pub trait NutritionEstimator: Send + Sync {
    /// Failure type of this estimator
    type Error: StdError + Send + Sync + 'static;

    /// Estimate nutrition for `recipe`
    async fn estimate(&self, recipe: &Recipe) -> Result<Nutrition, Self::Error>;
}

/// Nutrition from the recipe itself, or from `estimator` when absent
///
/// Estimation failures are logged and reported as `None`, which renders as
/// the "no nutrition" message.
pub async fn resolve_nutrition<E>(recipe: &Recipe, estimator: Option<&E>) -> Option<Nutrition>
where
    E: NutritionEstimator + ?Sized,
{
    if let Some(nutrition) = recipe.nutrition {
        return Some(nutrition);
    }
    let estimator = estimator?;
    match estimator.estimate(recipe).await {
        Ok(nutrition) => Some(nutrition),
        Err(e) => {
            warn!("Nutrition estimate failed: {e}");
            None
        }
    }
}

/// Estimator that asks the configured LLM
#[derive(Clone)]
pub struct LlmNutritionEstimator {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl LlmNutritionEstimator {
    /// Create an estimator sharing the generation provider and model
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, settings: &GenerationSettings) -> Self {
        Self {
            provider,
            model: settings.model.clone(),
        }
    }

    fn build_chat_request(&self, recipe: &Recipe) -> ChatRequest {
        ChatRequest::new(vec![
            ChatMessage::system(NUTRITION_SYSTEM_PROMPT),
            ChatMessage::user(nutrition_user_prompt(recipe)),
        ])
        .with_model(&self.model)
        .with_max_tokens(NUTRITION_MAX_TOKENS)
        .with_temperature(NUTRITION_TEMPERATURE)
        .with_response_format(ResponseFormat::JsonObject)
    }
}

#[async_trait]
impl NutritionEstimator for LlmNutritionEstimator {
    type Error = AppError;

    async fn estimate(&self, recipe: &Recipe) -> AppResult<Nutrition> {
        if recipe.ingredients.is_empty() {
            return Err(AppError::missing_field(MISSING_INGREDIENTS));
        }

        let response = self
            .provider
            .complete(&self.build_chat_request(recipe))
            .await?;

        parse_nutrition(&response.content).map_or_else(
            || {
                debug!("Unreadable nutrition completion: {}", response.content);
                Err(AppError::new(
                    ErrorCode::ExternalServiceError,
                    "Could not read nutrition estimate",
                )
                .with_details(json!({ "raw_text": response.content })))
            },
            Ok,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingEstimator {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl NutritionEstimator for CountingEstimator {
        type Error = AppError;

        async fn estimate(&self, _recipe: &Recipe) -> AppResult<Nutrition> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(AppError::internal("boom"))
            } else {
                Ok(Nutrition {
                    calories: 100.0,
                    ..Nutrition::default()
                })
            }
        }
    }

    #[tokio::test]
    async fn test_existing_nutrition_skips_estimator() {
        let estimator = CountingEstimator::default();
        let stored = Nutrition {
            calories: 42.0,
            ..Nutrition::default()
        };
        let recipe = Recipe::new("Soup").with_nutrition(stored);

        let resolved = resolve_nutrition(&recipe, Some(&estimator)).await;
        assert_eq!(resolved, Some(stored));
        assert_eq!(estimator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_nutrition_uses_estimator() {
        let estimator = CountingEstimator::default();
        let resolved = resolve_nutrition(&Recipe::new("Soup"), Some(&estimator)).await;
        assert!(resolved.is_some());
        assert_eq!(estimator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_estimate_resolves_to_none() {
        let estimator = CountingEstimator {
            fail: true,
            ..CountingEstimator::default()
        };
        assert_eq!(
            resolve_nutrition(&Recipe::new("Soup"), Some(&estimator)).await,
            None
        );
        assert_eq!(
            resolve_nutrition::<CountingEstimator>(&Recipe::new("Soup"), None).await,
            None
        );
    }
}
