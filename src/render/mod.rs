// ABOUTME: Pure recipe view-models for list, detail, nutrition, and favorites displays
// ABOUTME: Front ends render these into HTML or terminal text without further logic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

//! # Recipe Rendering
//!
//! Rendering happens in two steps. A [`Recipe`] first becomes a view-model
//! (plain strings and flags, no markup), then [`html`] or [`text`] turns the
//! view-model into output. Only the HTML layer escapes.

pub mod html;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::constants::labels::{REMOVE_FAVORITE, SAVE_FAVORITE, UNTITLED_RECIPE};
use crate::favorites::{FavoritesStore, KeyValueStorage, StorageError};
use crate::models::{Ingredient, Nutrition, Recipe};

/// Separator between meta items such as time and servings
pub const META_SEPARATOR: &str = " \u{2022} ";

fn display_title(recipe: &Recipe) -> String {
    let title = recipe.title.trim();
    if title.is_empty() {
        UNTITLED_RECIPE.to_owned()
    } else {
        title.to_owned()
    }
}

fn time_label(minutes: u32) -> String {
    format!("{minutes} mins")
}

fn servings_label(servings: u32) -> String {
    format!("{servings} servings")
}

/// List entry for a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummaryView {
    /// Title, `Untitled recipe` when blank
    pub title: String,
    /// Total time in minutes
    pub time_minutes: Option<u32>,
    /// Serving count
    pub servings: Option<u32>,
    /// `"30 mins • 4 servings"`, empty when both are unknown
    pub meta: String,
}

impl RecipeSummaryView {
    /// Summary of `recipe`
    #[must_use]
    pub fn from_recipe(recipe: &Recipe) -> Self {
        let meta = [
            recipe.time_minutes.map(time_label),
            recipe.servings.map(servings_label),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(META_SEPARATOR);

        Self {
            title: display_title(recipe),
            time_minutes: recipe.time_minutes,
            servings: recipe.servings,
            meta,
        }
    }
}

/// Visual weight of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    /// Call to action
    Primary,
    /// Destructive action
    Danger,
}

impl ButtonStyle {
    /// CSS class name
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Danger => "danger",
        }
    }
}

/// Save/remove control of the detail view
///
/// Activating the toggle writes through the store and updates the label and
/// style in place; the rest of the detail view is left alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteToggle {
    /// Whether the recipe is currently saved
    pub favorited: bool,
    /// Button text
    pub label: &'static str,
    /// Button style
    pub style: ButtonStyle,
}

impl FavoriteToggle {
    /// Toggle showing `favorited`
    #[must_use]
    pub const fn for_state(favorited: bool) -> Self {
        if favorited {
            Self {
                favorited,
                label: REMOVE_FAVORITE,
                style: ButtonStyle::Danger,
            }
        } else {
            Self {
                favorited,
                label: SAVE_FAVORITE,
                style: ButtonStyle::Primary,
            }
        }
    }

    /// Add or remove `recipe` depending on the current store state
    ///
    /// # Errors
    ///
    /// Returns the storage error and leaves the control unchanged when the
    /// write fails.
    pub fn activate<S: KeyValueStorage>(
        &mut self,
        store: &FavoritesStore<S>,
        recipe: &Recipe,
    ) -> Result<(), StorageError> {
        let favorited = store.toggle(recipe)?;
        *self = Self::for_state(favorited);
        Ok(())
    }
}

/// Full recipe display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeDetailView {
    /// Title, `Untitled recipe` when blank
    pub title: String,
    /// `"4 servings • 30 mins"`, empty when both are unknown
    pub meta: String,
    /// Ingredient lines, quantity first when known
    pub ingredients: Vec<String>,
    /// Steps in order; numbering is left to the renderer
    pub steps: Vec<String>,
    /// Notes block
    pub notes: Option<String>,
    /// Favorite control
    pub favorite: FavoriteToggle,
}

impl RecipeDetailView {
    /// Detail of `recipe` with a toggle for `favorited`
    #[must_use]
    pub fn from_recipe(recipe: &Recipe, favorited: bool) -> Self {
        let meta = [
            recipe.servings.map(servings_label),
            recipe.time_minutes.map(time_label),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(META_SEPARATOR);

        Self {
            title: display_title(recipe),
            meta,
            ingredients: recipe.ingredients.iter().map(ingredient_line).collect(),
            steps: recipe.steps.clone(),
            notes: recipe
                .notes
                .as_ref()
                .filter(|notes| !notes.trim().is_empty())
                .cloned(),
            favorite: FavoriteToggle::for_state(favorited),
        }
    }
}

fn ingredient_line(ingredient: &Ingredient) -> String {
    match ingredient.quantity() {
        Some(quantity) => format!("{quantity} {}", ingredient.display_name()),
        None => ingredient.display_name().to_owned(),
    }
}

/// Basis of the nutrition figures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutritionMode {
    /// Whole-recipe values divided by servings
    #[default]
    PerServing,
    /// Stored whole-recipe values
    WholeRecipe,
}

impl NutritionMode {
    /// The other mode
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::PerServing => Self::WholeRecipe,
            Self::WholeRecipe => Self::PerServing,
        }
    }

    /// Heading label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PerServing => "Per Serving",
            Self::WholeRecipe => "Whole Recipe",
        }
    }

    /// Text of the button switching to the other mode
    #[must_use]
    pub fn switch_label(self) -> String {
        format!("Switch to {}", self.toggled().label())
    }
}

/// Formatted nutrition figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionFigures {
    /// Current basis
    pub mode: NutritionMode,
    /// `"Nutrition (Per Serving)"`
    pub heading: String,
    /// `"480 kcal"`
    pub calories: String,
    /// `"12.0 g"`
    pub protein: String,
    /// `"60.5 g"`
    pub carbs: String,
    /// `"9.3 g"`
    pub fat: String,
    /// `"Switch to Whole Recipe"`
    pub switch_label: String,
}

/// Nutrition panel content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NutritionPanelView {
    /// Figures are known
    Available(NutritionFigures),
    /// No stored or estimated nutrition
    Unavailable,
}

impl NutritionPanelView {
    /// Panel for whole-recipe `nutrition` shown in `mode`
    ///
    /// Per-serving values divide by `servings`, or by one when unknown.
    #[must_use]
    pub fn new(nutrition: Option<Nutrition>, servings: Option<u32>, mode: NutritionMode) -> Self {
        let Some(whole) = nutrition else {
            return Self::Unavailable;
        };
        let shown = match mode {
            NutritionMode::PerServing => whole.per_serving(servings),
            NutritionMode::WholeRecipe => whole,
        };

        Self::Available(NutritionFigures {
            mode,
            heading: format!("Nutrition ({})", mode.label()),
            calories: format!("{:.0} kcal", shown.calories),
            protein: format!("{:.1} g", shown.protein_g),
            carbs: format!("{:.1} g", shown.carbs_g),
            fat: format!("{:.1} g", shown.fat_g),
            switch_label: mode.switch_label(),
        })
    }

    /// Panel for the nutrition stored on `recipe`
    #[must_use]
    pub fn for_recipe(recipe: &Recipe, mode: NutritionMode) -> Self {
        Self::new(recipe.nutrition, recipe.servings, mode)
    }
}

/// Favorites panel content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesListView {
    /// Entries, newest first
    pub items: Vec<RecipeSummaryView>,
    /// Visible count
    pub count: usize,
    /// Whether the "no favorites" message shows
    pub is_empty: bool,
}

impl FavoritesListView {
    /// View of a favorites collection
    #[must_use]
    pub fn from_recipes(favorites: &[Recipe]) -> Self {
        Self {
            items: favorites.iter().map(RecipeSummaryView::from_recipe).collect(),
            count: favorites.len(),
            is_empty: favorites.is_empty(),
        }
    }
}
