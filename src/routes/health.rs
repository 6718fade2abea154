// ABOUTME: Health check route handlers for service monitoring
// ABOUTME: Liveness reports the process is up; readiness also names the LLM provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use super::AppState;
use crate::constants::endpoints;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    ///
    /// Readiness does not call the upstream API; a provider health check
    /// costs a completion on hosted endpoints.
    pub fn routes(state: AppState) -> Router {
        async fn health_handler() -> Json<Value> {
            Json(json!({
                "status": "healthy",
                "service": "spicesync",
                "version": env!("CARGO_PKG_VERSION"),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        async fn ready_handler(State(state): State<AppState>) -> Json<Value> {
            let provider = state.provider();
            Json(json!({
                "status": "ready",
                "provider": provider.name(),
                "model": state.generation.settings().model,
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        Router::new()
            .route(endpoints::HEALTH_CHECK, get(health_handler))
            .route(endpoints::READY, get(ready_handler))
            .with_state(state)
    }
}
