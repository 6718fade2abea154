// ABOUTME: Configuration management module for server and client settings
// ABOUTME: Environment-only configuration with .env support and typed sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

//! Configuration module for SpiceSync
//!
//! - **Environment**: server configuration (HTTP, upstream LLM, generation,
//!   CORS, static assets) and client configuration (API URL, favorites
//!   directory), all read from environment variables.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    ClientConfig, CorsConfig, Environment, GenerationConfig, LlmConfig, LogLevel, ServerConfig,
};
