// ABOUTME: Deterministic recipe identity used for favorites lookup and deduplication
// ABOUTME: Identity is the trimmed title plus the JSON list of ingredient names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

use serde_json::Value;
use std::fmt;

use super::Recipe;

/// Stable identifier of a recipe
///
/// Two recipes with the same trimmed title and the same ordered list of
/// ingredient names share an identity, whatever their steps, notes, timing,
/// or nutrition. Such collisions count as the same favorite.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipeId(String);

impl RecipeId {
    /// Borrow the identifier text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the identity of `recipe`: `trim(title) + "|" + json(ingredient names)`
#[must_use]
pub fn recipe_identity(recipe: &Recipe) -> RecipeId {
    let names = Value::Array(recipe.ingredient_names().map(Value::from).collect());
    RecipeId(format!("{}|{names}", recipe.title.trim()))
}

impl Recipe {
    /// Identity of this recipe, see [`recipe_identity`]
    #[must_use]
    pub fn identity(&self) -> RecipeId {
        recipe_identity(self)
    }
}
