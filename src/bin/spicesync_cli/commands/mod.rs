// ABOUTME: Subcommand implementations for spicesync-cli
// ABOUTME: Recipe generation and favorites management
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

pub mod favorites;
pub mod generate;
