// ABOUTME: HTTP middleware for the recipe API
// ABOUTME: CORS setup and request ID propagation for structured logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

pub mod cors;
pub mod request_id;

// CORS configuration
pub use cors::setup_cors;

// Request correlation
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
