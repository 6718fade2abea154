// ABOUTME: CORS middleware configuration for the recipe API
// ABOUTME: Lets the browser client call the API from another origin during development
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

use http::{header::HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::CorsConfig;

/// Configure CORS for the API routes
///
/// `CORS_ALLOWED_ORIGINS` holds `*` or a comma-separated origin list. Entries
/// that are not valid header values are skipped; when none remain any origin
/// is allowed.
///
/// ```bash
/// export CORS_ALLOWED_ORIGINS="http://localhost:5173,https://recipes.example.com"
/// ```
#[must_use]
pub fn setup_cors(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allow_origin(&config.allowed_origins))
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("x-request-id"),
        ])
        .expose_headers([HeaderName::from_static("x-request-id")])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
}

fn allow_origin(allowed_origins: &str) -> AllowOrigin {
    let allowed_origins = allowed_origins.trim();
    if allowed_origins.is_empty() || allowed_origins == "*" {
        return AllowOrigin::any();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    }
}
