// ABOUTME: Axum HTTP testing utilities for integration tests
// ABOUTME: Drives a Router with tower oneshot and captures status, headers, and body

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde::Serialize;
use tower::ServiceExt;

/// Request builder for in-process router tests
pub struct AxumTestRequest {
    method: Method,
    uri: String,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl AxumTestRequest {
    fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.to_owned(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// GET `uri`
    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    /// POST `uri`
    pub fn post(uri: &str) -> Self {
        Self::new(Method::POST, uri)
    }

    #[allow(dead_code)]
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_owned(), value.to_owned()));
        self
    }

    /// Serialize `data` as the JSON body
    pub fn json<T: Serialize>(self, data: &T) -> Self {
        let body = serde_json::to_string(data).expect("request body serializes");
        self.raw_json(&body)
    }

    /// Send `raw` as a JSON-typed body without checking it
    pub fn raw_json(mut self, raw: &str) -> Self {
        self.body = Some(raw.to_owned());
        self.headers.push((
            header::CONTENT_TYPE.as_str().to_owned(),
            "application/json".to_owned(),
        ));
        self
    }

    /// Run the request through `app` in-process and buffer the answer
    pub async fn send(self, app: Router) -> AxumTestResponse {
        let request = self
            .headers
            .iter()
            .fold(
                Request::builder().method(self.method).uri(self.uri),
                |builder, (key, value)| builder.header(key, value),
            )
            .body(Body::from(self.body.unwrap_or_default()))
            .expect("valid test request");

        let response = app.oneshot(request).await.expect("router is infallible");
        let (parts, body) = response.into_parts();
        let body = to_bytes(body, usize::MAX)
            .await
            .expect("readable response body")
            .to_vec();

        AxumTestResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }
}

/// Buffered router response
pub struct AxumTestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl AxumTestResponse {
    /// Status as a plain number
    pub const fn status(&self) -> u16 {
        self.status.as_u16()
    }

    /// Value of a response header
    #[allow(dead_code)]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Body decoded as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("JSON response body")
    }
}
