// ABOUTME: Utility modules for common functionality across the application
// ABOUTME: Contains HTML escaping and HTTP client construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

/// HTML escaping for rendered markup
pub mod html;
/// HTTP client configuration and helpers
pub mod http_client;
