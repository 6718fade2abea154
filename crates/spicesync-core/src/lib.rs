// ABOUTME: Core types and constants for the SpiceSync recipe generator
// ABOUTME: Foundation crate with error handling, recipe models, and recipe identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

#![deny(unsafe_code)]

//! # SpiceSync Core
//!
//! Foundation crate shared by the HTTP backend and the client. It changes
//! rarely, so the rest of the workspace can compile incrementally on top of it.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Storage keys, defaults, and user-facing labels
//! - **models**: The `Recipe` data model and its identity function

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Recipe data model, nutrition facts, and recipe identity
pub mod models;
