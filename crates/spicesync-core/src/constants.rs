// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Storage keys, generation defaults, API paths, and user-facing labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! flat list.

/// Favorites persistence
pub mod storage {
    /// Key of the single slot holding the serialized favorites array
    pub const FAVORITES_KEY: &str = "spicesync_favorites_v1";
    /// File name offered for the export artifact
    pub const EXPORT_FILE_NAME: &str = "spicesync_favorites.json";
}

/// API endpoints
pub mod endpoints {
    /// Recipe generation endpoint
    pub const GENERATE: &str = "/api/generate";
    /// Nutrition estimation endpoint
    pub const NUTRITION: &str = "/api/nutrition";
    /// Health check endpoint
    pub const HEALTH_CHECK: &str = "/health";
    /// Readiness endpoint
    pub const READY: &str = "/ready";
}

/// Generation request defaults
pub mod generation {
    /// Cuisine used when the user made no selection
    pub const DEFAULT_CUISINE: &str = "any";
    /// Output language used when the user made no selection
    pub const DEFAULT_LANGUAGE: &str = "en";
    /// Number of recipes requested from the model
    pub const DEFAULT_RECIPE_COUNT: u8 = 3;
    /// Upper bound for the number of recipes per request
    pub const MAX_RECIPE_COUNT: u8 = 6;
}

/// User-facing labels and messages
pub mod labels {
    /// Title shown for recipes without one
    pub const UNTITLED_RECIPE: &str = "Untitled recipe";
    /// Generate button, idle
    pub const GENERATE_IDLE: &str = "Generate Recipes";
    /// Generate button, request in flight
    pub const GENERATE_BUSY: &str = "Generating...";
    /// Prompt shown when the ingredients field is empty
    pub const EMPTY_INGREDIENTS: &str = "Please enter at least one ingredient";
    /// Empty result set
    pub const NO_RECIPES: &str = "No recipes generated.";
    /// Fallback when the server did not say what went wrong
    pub const UNKNOWN_ERROR: &str = "unknown error";
    /// Server-side message for a blank ingredients field
    pub const MISSING_INGREDIENTS: &str = "Missing ingredients";
    /// Favorite toggle when the recipe is not saved
    pub const SAVE_FAVORITE: &str = "Save to favorites";
    /// Favorite toggle when the recipe is saved
    pub const REMOVE_FAVORITE: &str = "Remove from favorites";
    /// Shown when the favorites list is empty
    pub const NO_FAVORITES: &str = "No favorites yet.";
    /// Shown when no nutrition data exists
    pub const NO_NUTRITION: &str = "No nutrition info available.";
    /// Confirmation prompt before clearing favorites
    pub const CLEAR_CONFIRMATION: &str = "Clear all favorites? This cannot be undone.";
}
