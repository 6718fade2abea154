// ABOUTME: POST /api/generate handler turning ingredients into recipes
// ABOUTME: Maps body rejections and generation failures onto the JSON error envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Extension, Json, Router,
};

use super::AppState;
use crate::constants::endpoints;
use crate::errors::{AppError, AppResult};
use crate::generation::{GenerateRequest, GenerateResponse};
use crate::middleware::RequestId;

/// Recipe generation routes
pub struct GenerateRoutes;

impl GenerateRoutes {
    /// Create the generation route
    pub fn routes(state: AppState) -> Router {
        Router::new()
            .route(endpoints::GENERATE, post(Self::handle_generate))
            .with_state(state)
    }

    async fn handle_generate(
        State(state): State<AppState>,
        request_id: Option<Extension<RequestId>>,
        payload: Result<Json<GenerateRequest>, JsonRejection>,
    ) -> AppResult<Json<GenerateResponse>> {
        let tag = |error: AppError| match &request_id {
            Some(Extension(id)) => error.with_request_id(id.as_str()),
            None => error,
        };

        let Json(request) = payload.map_err(|rejection| tag(rejection_error(&rejection)))?;
        let output = state.generation.generate(&request).await.map_err(tag)?;
        Ok(Json(GenerateResponse::from(output)))
    }
}

/// Error for a body axum could not turn into JSON
pub(crate) fn rejection_error(rejection: &JsonRejection) -> AppError {
    AppError::invalid_input(format!("Invalid request body: {}", rejection.body_text()))
}
