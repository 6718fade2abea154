// ABOUTME: Route module organization for the SpiceSync HTTP API
// ABOUTME: Shared application state plus health, generation, and nutrition routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

//! HTTP routes
//!
//! Each submodule exposes a `*Routes` type with a `routes()` constructor.
//! Stateful routes take [`AppState`], which is cheap to clone.

use std::sync::Arc;

use crate::generation::{GenerationService, GenerationSettings};
use crate::llm::LlmProvider;
use crate::nutrition::LlmNutritionEstimator;

/// Recipe generation route
pub mod generate;
/// Health and readiness routes
pub mod health;
/// Nutrition estimation route
pub mod nutrition;

pub use generate::GenerateRoutes;
pub use health::HealthRoutes;
pub use nutrition::NutritionRoutes;

/// State shared by all API handlers
#[derive(Clone)]
pub struct AppState {
    /// Generation pipeline
    pub generation: GenerationService,
    /// Nutrition estimator sharing the generation provider
    pub nutrition: Arc<LlmNutritionEstimator>,
}

impl AppState {
    /// Build state around one provider
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, settings: GenerationSettings) -> Self {
        let nutrition = Arc::new(LlmNutritionEstimator::new(provider.clone(), &settings));
        Self {
            generation: GenerationService::new(provider, settings),
            nutrition,
        }
    }

    /// Provider behind both services
    #[must_use]
    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        self.generation.provider()
    }
}
