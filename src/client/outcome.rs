// ABOUTME: Display outcome of a generation attempt
// ABOUTME: Distinguishes results, empty results, raw text, API, network, and input errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

use serde::Serialize;

use super::ClientError;
use crate::constants::labels::{EMPTY_INGREDIENTS, NO_RECIPES};
use crate::generation::GenerateResponse;
use crate::models::Recipe;

/// What the result area shows after pressing generate
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationOutcome {
    /// At least one recipe
    Recipes {
        /// Recipes in server order
        recipes: Vec<Recipe>,
    },
    /// The server succeeded with an empty list
    NoResults,
    /// The model answered with text that is not recipe JSON
    Unstructured {
        /// Completion text
        raw_text: String,
    },
    /// The server reported a failure
    ApiError {
        /// Server message, `unknown error` when absent
        message: String,
        /// Pretty-printed payload for the diagnostics panel
        raw: Option<String>,
    },
    /// The request did not reach the server or got no answer
    NetworkError {
        /// Transport error description
        message: String,
    },
    /// The ingredients field was blank; nothing was sent
    EmptyInput,
    /// A request was already in flight; nothing was sent
    Busy,
}

impl GenerationOutcome {
    /// Outcome of a successful call
    #[must_use]
    pub fn from_response(response: GenerateResponse) -> Self {
        match response.raw_text {
            Some(raw_text) if response.recipes.is_empty() => Self::Unstructured { raw_text },
            _ if response.recipes.is_empty() => Self::NoResults,
            _ => Self::Recipes {
                recipes: response.recipes,
            },
        }
    }

    /// Outcome of a failed call
    #[must_use]
    pub fn from_error(error: &ClientError) -> Self {
        match error {
            ClientError::Network(e) => Self::NetworkError {
                message: e.to_string(),
            },
            ClientError::Api { message, .. } => Self::ApiError {
                message: message.clone(),
                raw: error.raw_payload(),
            },
            ClientError::InvalidResponse { .. } => Self::ApiError {
                message: error.to_string(),
                raw: error.raw_payload(),
            },
        }
    }

    /// Line shown to the user, if any
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Recipes { .. } | Self::Unstructured { .. } | Self::Busy => None,
            Self::NoResults => Some(NO_RECIPES.to_owned()),
            Self::ApiError { message, .. } => Some(format!("Error: {message}")),
            Self::NetworkError { message } => Some(format!("Network error: {message}")),
            Self::EmptyInput => Some(EMPTY_INGREDIENTS.to_owned()),
        }
    }

    /// Diagnostics panel content; hidden for everything but API errors
    #[must_use]
    pub fn raw_panel(&self) -> Option<&str> {
        match self {
            Self::ApiError { raw, .. } => raw.as_deref(),
            _ => None,
        }
    }

    /// Recipes to list
    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        match self {
            Self::Recipes { recipes } => recipes,
            _ => &[],
        }
    }
}
