// ABOUTME: POST /api/nutrition handler estimating nutrition for one recipe
// ABOUTME: Returns whole-recipe figures in the success envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Extension, Json, Router,
};
use tracing::info;

use super::{generate::rejection_error, AppState};
use crate::constants::endpoints;
use crate::errors::AppResult;
use crate::middleware::RequestId;
use crate::models::Recipe;
use crate::nutrition::{NutritionEstimator, NutritionResponse};

/// Nutrition estimation routes
pub struct NutritionRoutes;

impl NutritionRoutes {
    /// Create the nutrition route
    pub fn routes(state: AppState) -> Router {
        Router::new()
            .route(endpoints::NUTRITION, post(Self::handle_nutrition))
            .with_state(state)
    }

    async fn handle_nutrition(
        State(state): State<AppState>,
        request_id: Option<Extension<RequestId>>,
        payload: Result<Json<Recipe>, JsonRejection>,
    ) -> AppResult<Json<NutritionResponse>> {
        let result = match payload {
            Ok(Json(recipe)) => state.nutrition.estimate(&recipe).await.map(|nutrition| {
                info!(title = %recipe.title, calories = nutrition.calories, "Estimated nutrition");
                nutrition
            }),
            Err(rejection) => Err(rejection_error(&rejection)),
        };

        result.map(|nutrition| Json(NutritionResponse::new(nutrition))).map_err(|error| {
            match request_id {
                Some(Extension(id)) => error.with_request_id(id.as_str()),
                None => error,
            }
        })
    }
}
