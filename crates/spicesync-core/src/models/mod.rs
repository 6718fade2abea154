// ABOUTME: Core data models for recipes and their identity
// ABOUTME: Re-exports Recipe, Ingredient, Nutrition, and RecipeId
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

mod identity;
mod lenient;
mod recipe;

pub use identity::{recipe_identity, RecipeId};
pub use recipe::{Ingredient, MeasuredIngredient, Nutrition, Recipe};
