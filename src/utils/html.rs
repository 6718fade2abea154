// ABOUTME: HTML escaping utilities to prevent XSS in rendered recipe markup
// ABOUTME: Escapes user- and model-supplied text for element content and attributes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

use std::borrow::Cow;

/// Escape text for insertion into HTML content or quoted attribute values.
///
/// Replaces the five HTML-special characters (`&`, `<`, `>`, `"`, `'`) with
/// entities. Text without special characters is returned borrowed.
#[must_use]
pub fn escape_html(input: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(input)
}
