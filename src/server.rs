// ABOUTME: HTTP server assembly for the SpiceSync backend
// ABOUTME: Builds the axum router with its middleware stack and runs it until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

//! # Server
//!
//! [`router`] builds the app with its middleware;
//! [`serve`] binds it to a TCP listener and runs until Ctrl-C or SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::{
    limit::RequestBodyLimitLayer, services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::generation::GenerationSettings;
use crate::llm::{LlmProvider, OpenAiCompatibleProvider};
use crate::middleware::{request_id_middleware, setup_cors};
use crate::routes::{AppState, GenerateRoutes, HealthRoutes, NutritionRoutes};

/// Largest accepted request body
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Slack on top of the upstream timeout before a request is abandoned
const REQUEST_TIMEOUT_MARGIN_SECS: u64 = 15;

/// Build the application router
///
/// API routes take precedence; when `config.static_dir` exists its files
/// are served for every other path.
pub fn router(config: &ServerConfig, state: AppState) -> Router {
    let request_timeout =
        Duration::from_secs(config.llm.timeout_secs + REQUEST_TIMEOUT_MARGIN_SECS);

    let mut app = Router::new()
        .merge(HealthRoutes::routes(state.clone()))
        .merge(GenerateRoutes::routes(state.clone()))
        .merge(NutritionRoutes::routes(state));

    if config.static_dir.is_dir() {
        info!("Serving static files from {}", config.static_dir.display());
        app = app.fallback_service(ServeDir::new(&config.static_dir));
    } else {
        warn!(
            "Static directory {} not found, serving the API only",
            config.static_dir.display()
        );
    }

    // Each layer goes through `Route` separately so every inner response is
    // an axum `Response` again; the last layer is the outermost
    app.layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(setup_cors(&config.cors))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

/// Create the upstream provider and shared state for `config`
///
/// # Errors
///
/// Returns an error if the HTTP client for the provider cannot be built.
pub fn build_state(config: &ServerConfig) -> Result<AppState> {
    let provider: Arc<dyn LlmProvider> = Arc::new(
        OpenAiCompatibleProvider::from_llm_config(&config.llm)
            .context("Failed to create LLM provider")?,
    );
    let settings = GenerationSettings::from_config(&config.llm, &config.generation);
    Ok(AppState::new(provider, settings))
}

/// Bind and serve until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the address cannot be
/// bound, or the server fails while running.
pub async fn serve(config: ServerConfig) -> Result<()> {
    config.validate()?;
    let state = build_state(&config)?;
    let app = router(&config, state);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("SpiceSync listening on http://{address}");
    info!("{}", config.summary());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
