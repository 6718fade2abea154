// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging, server configuration, router, and in-process server helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `spicesync`

use axum::Router;
use spicesync::{
    config::{LlmConfig, ServerConfig},
    generation::GenerationSettings,
    llm::LlmProvider,
    routes::AppState,
    server,
};
use std::path::PathBuf;
use std::sync::{Arc, Once};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Server configuration that needs no environment and serves no static files
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_owned(),
        llm: LlmConfig {
            api_key: Some("test-key".to_owned()),
            ..LlmConfig::default()
        },
        static_dir: PathBuf::from("target/spicesync-no-static-assets"),
        ..ServerConfig::default()
    }
}

/// Full application router around `provider`
pub fn test_app(provider: Arc<dyn LlmProvider>) -> Router {
    init_test_logging();
    let config = test_config();
    let settings = GenerationSettings::from_config(&config.llm, &config.generation);
    server::router(&config, AppState::new(provider, settings))
}

/// Serve the application on an ephemeral local port
///
/// Returns the base URL and the server task.
pub async fn spawn_server(provider: Arc<dyn LlmProvider>) -> (String, JoinHandle<()>) {
    let app = test_app(provider);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{address}"), handle)
}

/// Completion holding two recipes in the documented shape
pub const TWO_RECIPES: &str = r#"{
  "recipes": [
    {
      "title": "Carrot Soup",
      "servings": 4,
      "time_minutes": 30,
      "ingredients": [{"name": "carrot", "quantity": "4"}, {"name": "onion", "quantity": "1"}],
      "steps": ["Chop the vegetables", "Simmer for 20 minutes"],
      "notes": "Blend until smooth",
      "nutrition": {"calories": 480, "protein_g": 8, "carbs_g": 60, "fat_g": 20}
    },
    {
      "title": "Roasted Carrots",
      "servings": 2,
      "time_minutes": 40,
      "ingredients": ["carrot", "olive oil"],
      "steps": ["Roast at 200C"]
    }
  ]
}"#;
