// ABOUTME: Unified error type, error codes, and the JSON error payload
// ABOUTME: Shared by the backend routes, the LLM layer, and the client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

//! # Unified Error Handling System
//!
//! Every fallible backend operation returns [`AppError`]. The error carries an
//! [`ErrorCode`] that decides the HTTP status, a human readable message that is
//! shown to the user verbatim, and optional diagnostic details (for instance
//! the raw upstream payload).

#[cfg(feature = "http-response")]
mod http;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation
    /// The provided input is invalid
    InvalidInput,
    /// A required field is missing or blank
    MissingRequiredField,
    /// The data format is invalid
    InvalidFormat,

    // Resources
    /// The requested resource does not exist
    ResourceNotFound,

    // External services
    /// The upstream service answered with an error
    ExternalServiceError,
    /// The upstream service could not be reached
    ExternalServiceUnavailable,
    /// The upstream service rejected our credentials
    ExternalAuthFailed,
    /// The upstream service rate limited us
    ExternalRateLimited,

    // Configuration
    /// Generic configuration error
    ConfigError,
    /// Required configuration is missing
    ConfigMissing,

    // Internal
    /// Unexpected internal failure
    InternalError,
    /// Persistence failure
    StorageError,
    /// Serialization or deserialization failure
    SerializationError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput | Self::MissingRequiredField | Self::InvalidFormat => 400,
            Self::ResourceNotFound => 404,
            Self::ExternalRateLimited => 429,
            Self::ExternalServiceError | Self::ExternalAuthFailed => 502,
            Self::ExternalServiceUnavailable => 503,
            Self::ConfigError
            | Self::ConfigMissing
            | Self::InternalError
            | Self::StorageError
            | Self::SerializationError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing from the request",
            Self::InvalidFormat => "The data format is invalid",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::ExternalAuthFailed => "Authentication with external service failed",
            Self::ExternalRateLimited => "External service rate limit exceeded",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::InternalError => "An internal server error occurred",
            Self::StorageError => "Storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Request ID for log correlation
    pub request_id: Option<String>,
    /// Diagnostic payload attached to the error response
    pub details: Option<Value>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            request_id: None,
            details: None,
        }
    }

    /// Add a request ID to the error
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Attach diagnostic details
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// A required field is missing
    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingRequiredField, message)
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// External service error
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// External service could not be reached
    pub fn external_unavailable(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string())
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error payload
///
/// Mirrors the success envelope of the API: clients look at `success` first
/// and display `error` verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    /// Message shown to the user
    pub error: String,
    /// Machine readable error code
    pub code: ErrorCode,
    /// Request ID for log correlation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Diagnostic payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            success: false,
            error: error.message,
            code: error.code,
            request_id: error.request_id,
            details: error.details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::MissingRequiredField.http_status(), 400);
        assert_eq!(ErrorCode::ExternalRateLimited.http_status(), 429);
        assert_eq!(ErrorCode::ExternalServiceError.http_status(), 502);
        assert_eq!(ErrorCode::InternalError.http_status(), 500);
    }

    #[test]
    fn test_error_response_keeps_message_verbatim() {
        let error = AppError::missing_field("Missing ingredients").with_request_id("req-1");
        let response = ErrorResponse::from(error);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["error"], json!("Missing ingredients"));
        assert_eq!(value["code"], json!("MISSING_REQUIRED_FIELD"));
        assert_eq!(value["request_id"], json!("req-1"));
        assert!(value.get("details").is_none());
    }

    #[test]
    fn test_details_are_serialized_when_present() {
        let error = AppError::external_service("OpenRouter", "request failed")
            .with_details(json!({"status": 401}));
        let response = ErrorResponse::from(error);

        assert_eq!(response.error, "OpenRouter: request failed");
        assert_eq!(response.details, Some(json!({"status": 401})));
    }
}
