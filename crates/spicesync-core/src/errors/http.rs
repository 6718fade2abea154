// ABOUTME: axum response conversion for AppError
// ABOUTME: Renders the JSON error envelope with the status derived from the error code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use tracing::{error, warn};

use super::{AppError, ErrorResponse};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(code = ?self.code, request_id = ?self.request_id, "{}", self.message);
        } else {
            warn!(code = ?self.code, request_id = ?self.request_id, "{}", self.message);
        }

        (status, Json(ErrorResponse::from(self))).into_response()
    }
}
