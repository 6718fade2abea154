// ABOUTME: Integration tests for the request ID middleware
// ABOUTME: Covers ID generation, caller-supplied IDs, and handler access via extensions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    body::{to_bytes, Body},
    http::{Request as HttpRequest, StatusCode},
    middleware,
    routing::get,
    Extension, Router,
};
use spicesync::middleware::request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
use std::error::Error;
use tower::ServiceExt;
use uuid::Uuid;

async fn test_handler(Extension(request_id): Extension<RequestId>) -> String {
    format!("Request ID: {}", request_id.as_str())
}

fn app() -> Router {
    Router::new()
        .route("/", get(test_handler))
        .layer(middleware::from_fn(request_id_middleware))
}

#[tokio::test]
async fn test_request_id_middleware_generates_id() -> Result<(), Box<dyn Error>> {
    let request = HttpRequest::builder().uri("/").body(Body::empty())?;
    let response = app().oneshot(request).await?;

    let header = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .ok_or("Request ID header not present")?;
    assert!(
        Uuid::parse_str(header.to_str()?).is_ok(),
        "Request ID is not a valid UUID"
    );
    Ok(())
}

#[tokio::test]
async fn test_caller_request_id_is_kept() -> Result<(), Box<dyn Error>> {
    let request = HttpRequest::builder()
        .uri("/")
        .header(REQUEST_ID_HEADER, "trace-abc")
        .body(Body::empty())?;
    let response = app().oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "trace-abc");

    let body = to_bytes(response.into_body(), usize::MAX).await?;
    assert_eq!(String::from_utf8(body.to_vec())?, "Request ID: trace-abc");
    Ok(())
}

#[tokio::test]
async fn test_oversized_caller_id_is_replaced() -> Result<(), Box<dyn Error>> {
    let request = HttpRequest::builder()
        .uri("/")
        .header(REQUEST_ID_HEADER, "x".repeat(500))
        .body(Body::empty())?;
    let response = app().oneshot(request).await?;

    let header = response.headers()[REQUEST_ID_HEADER].to_str()?;
    assert!(Uuid::parse_str(header).is_ok());
    Ok(())
}
