// ABOUTME: Client side of recipe generation: HTTP API client and UI state
// ABOUTME: Maps backend responses and transport failures onto display outcomes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

//! # SpiceSync Client
//!
//! - [`ApiClient`]: typed calls to `/api/generate` and `/api/nutrition`
//! - [`UiContext`]: selected cuisine, language, current recipe, nutrition mode
//! - [`GenerateControl`]: the generate button, one request in flight at a time
//! - [`GenerationOutcome`]: what the result area shows after a request

mod context;
mod control;
mod outcome;

pub use context::UiContext;
pub use control::{GenerateControl, InFlightGuard};
pub use outcome::GenerationOutcome;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::constants::endpoints;
use crate::constants::labels::UNKNOWN_ERROR;
use crate::generation::{GenerateRequest, GenerateResponse};
use crate::models::{Nutrition, Recipe};
use crate::nutrition::{NutritionEstimator, NutritionResponse};
use crate::utils::http_client::api_client;

/// Client-side failure of an API call
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never got an HTTP answer (timeout, refused connection, DNS)
    #[error("{0}")]
    Network(#[source] reqwest::Error),
    /// The server answered with a failure status or without the success marker
    #[error("{message}")]
    Api {
        /// HTTP status of the answer
        status: u16,
        /// Server-provided message, `unknown error` when absent
        message: String,
        /// Whole payload, for diagnostics
        raw: Value,
    },
    /// The server answered with something that is not the expected JSON
    #[error("invalid response from server: {message}")]
    InvalidResponse {
        /// HTTP status of the answer
        status: u16,
        /// Decoding failure
        message: String,
        /// Body excerpt
        body: String,
    },
}

impl ClientError {
    /// Payload to show in the diagnostics panel
    #[must_use]
    pub fn raw_payload(&self) -> Option<String> {
        match self {
            Self::Network(_) => None,
            Self::Api { raw, .. } => {
                Some(serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string()))
            }
            Self::InvalidResponse { body, .. } => Some(body.clone()),
        }
    }
}

/// Seam between the UI and the generation endpoint
#[async_trait]
pub trait GenerationApi: Send + Sync {
    /// Send one generation request
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ClientError>;
}

/// HTTP client for the SpiceSync backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Client for the backend at `base_url`
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(api_client(), base_url)
    }

    /// Client reusing an existing `reqwest` client
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    /// Client from client configuration
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.api_url)
    }

    /// Backend base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// POST `body` to `path` and decode a success envelope
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(ClientError::Network)?;

        let status = response.status();
        let text = response.text().await.map_err(ClientError::Network)?;
        debug!(status = %status, bytes = text.len(), "API response from {path}");
        decode_envelope(status, &text)
    }

    /// Ask the backend to estimate nutrition for `recipe`
    ///
    /// # Errors
    ///
    /// Returns network, API, or decoding errors.
    #[instrument(skip(self, recipe), fields(title = %recipe.title))]
    pub async fn estimate_nutrition(&self, recipe: &Recipe) -> Result<Nutrition, ClientError> {
        let response: NutritionResponse = self.post_json(endpoints::NUTRITION, recipe).await?;
        Ok(response.nutrition)
    }
}

/// Decode a `{success: ...}` envelope, turning failures into [`ClientError`]
fn decode_envelope<T: DeserializeOwned>(status: StatusCode, text: &str) -> Result<T, ClientError> {
    let invalid = |message: String| ClientError::InvalidResponse {
        status: status.as_u16(),
        message,
        body: text.chars().take(2000).collect(),
    };

    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) if status.is_success() => return Err(invalid(e.to_string())),
        Err(_) => {
            // Non-JSON failure bodies still surface as API errors
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: UNKNOWN_ERROR.to_owned(),
                raw: Value::String(text.to_owned()),
            });
        }
    };

    let succeeded = value.get("success").and_then(Value::as_bool) == Some(true);
    if !status.is_success() || !succeeded {
        let message = value
            .get("error")
            .and_then(Value::as_str)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or(UNKNOWN_ERROR)
            .to_owned();
        warn!(status = %status, "API error: {message}");
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
            raw: value,
        });
    }

    serde_json::from_value(value).map_err(|e| invalid(e.to_string()))
}

#[async_trait]
impl GenerationApi for ApiClient {
    #[instrument(skip(self, request))]
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ClientError> {
        self.post_json(endpoints::GENERATE, request).await
    }
}

#[async_trait]
impl NutritionEstimator for ApiClient {
    type Error = ClientError;

    async fn estimate(&self, recipe: &Recipe) -> Result<Nutrition, ClientError> {
        self.estimate_nutrition(recipe).await
    }
}
