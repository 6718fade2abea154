// ABOUTME: Main library entry point for the SpiceSync recipe generator
// ABOUTME: HTTP backend, LLM provider layer, favorites store, rendering, and API client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

#![deny(unsafe_code)]

//! # SpiceSync
//!
//! Ingredient-driven recipe generation. A user lists what is in the fridge,
//! picks a cuisine and an output language, and the backend asks an
//! OpenAI-compatible LLM for a handful of recipes in strict JSON.
//!
//! ## Architecture
//!
//! - **Backend**: `server` and `routes` expose `POST /api/generate`,
//!   `POST /api/nutrition`, and health checks over axum
//! - **LLM**: `llm` talks to OpenRouter or any OpenAI-compatible endpoint;
//!   `generation` turns completions into recipes
//! - **Client**: `client` calls the API and tracks UI state; `render` maps
//!   recipes to view models and markup
//! - **Favorites**: `favorites` keeps saved recipes in a local key-value slot
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use spicesync::config::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     spicesync::server::serve(config).await
//! }
//! ```

// Core types live in the spicesync-core crate
pub use spicesync_core::{constants, errors, models};

/// API client, UI state, and generate control
pub mod client;

/// Environment-based configuration for server and client
pub mod config;

/// Saved recipes with export and import
pub mod favorites;

/// Recipe generation pipeline and completion parsing
pub mod generation;

/// LLM provider abstraction and the OpenAI-compatible implementation
pub mod llm;

/// Structured logging setup
pub mod logging;

/// HTTP middleware (CORS, request IDs)
pub mod middleware;

/// Nutrition estimation
pub mod nutrition;

/// View models and renderers for recipes, favorites, and nutrition
pub mod render;

/// HTTP route handlers
pub mod routes;

/// Router assembly and server lifecycle
pub mod server;

/// Shared helpers
pub mod utils;
