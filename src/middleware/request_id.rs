// ABOUTME: Request ID middleware for log correlation across one API call
// ABOUTME: Reuses the caller's x-request-id or generates a UUID, and echoes it back
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

use axum::{extract::Request, middleware::Next, response::Response};
use http::HeaderValue;
use tracing::{info_span, Instrument};
use uuid::Uuid;

/// Header carrying the request ID in both directions
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied ID we accept
const MAX_REQUEST_ID_LEN: usize = 128;

/// Request ID available to handlers as an extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// Fresh random ID
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn incoming_request_id(request: &Request) -> Option<RequestId> {
    let value = request.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?.trim();
    (!value.is_empty() && value.len() <= MAX_REQUEST_ID_LEN).then(|| RequestId(value.to_owned()))
}

/// Attach a [`RequestId`] to the request, its span, and the response header
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = incoming_request_id(&request).unwrap_or_else(RequestId::generate);
    request.extensions_mut().insert(request_id.clone());

    let span = info_span!(
        "request",
        request_id = %request_id.as_str(),
        method = %request.method(),
        path = %request.uri().path(),
    );
    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
