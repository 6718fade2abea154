// ABOUTME: HTTP client construction with timeouts for the SpiceSync API client
// ABOUTME: Falls back to a default client when the configured builder fails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Request timeout for calls to the SpiceSync backend
///
/// Longer than the backend's own upstream timeout so the server, not the
/// client, reports a slow model.
pub const API_TIMEOUT_SECS: u64 = 150;

/// Connection timeout for calls to the SpiceSync backend
pub const API_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Create a new HTTP client with custom timeout settings
#[must_use]
pub fn create_client_with_timeout(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .user_agent(concat!("spicesync/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Client for SpiceSync API calls
#[must_use]
pub fn api_client() -> Client {
    create_client_with_timeout(API_TIMEOUT_SECS, API_CONNECT_TIMEOUT_SECS)
}
