// ABOUTME: Plain-text rendering of recipe view-models for the terminal client
// ABOUTME: Mirrors the HTML layout with numbered lists and simple headings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

use std::fmt::Write;

use super::{FavoritesListView, NutritionPanelView, RecipeDetailView, RecipeSummaryView};
use crate::constants::labels::{NO_FAVORITES, NO_NUTRITION, NO_RECIPES};

/// One line per recipe: `[n] Title (meta)`
#[must_use]
pub fn recipe_list(views: &[RecipeSummaryView]) -> String {
    if views.is_empty() {
        return format!("{NO_RECIPES}\n");
    }
    let mut out = String::new();
    for (index, view) in views.iter().enumerate() {
        if view.meta.is_empty() {
            let _ = writeln!(out, "[{}] {}", index + 1, view.title);
        } else {
            let _ = writeln!(out, "[{}] {} ({})", index + 1, view.title, view.meta);
        }
    }
    out
}

/// Full recipe with numbered steps and the favorite state
#[must_use]
pub fn recipe_detail(view: &RecipeDetailView) -> String {
    let mut out = format!("{}\n", view.title);
    if !view.meta.is_empty() {
        let _ = writeln!(out, "{}", view.meta);
    }

    out.push_str("\nIngredients\n");
    for line in &view.ingredients {
        let _ = writeln!(out, "  - {line}");
    }
    out.push_str("\nSteps\n");
    for (number, step) in view.steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {step}", number + 1);
    }
    if let Some(notes) = &view.notes {
        let _ = write!(out, "\nNotes\n  {notes}\n");
    }
    let _ = write!(out, "\n[{}]\n", view.favorite.label);
    out
}

/// Nutrition figures or the "no nutrition" message
#[must_use]
pub fn nutrition_panel(view: &NutritionPanelView) -> String {
    match view {
        NutritionPanelView::Unavailable => format!("{NO_NUTRITION}\n"),
        NutritionPanelView::Available(figures) => format!(
            "{}\n  Calories: {}\n  Protein: {}\n  Carbs: {}\n  Fat: {}\n",
            figures.heading, figures.calories, figures.protein, figures.carbs, figures.fat
        ),
    }
}

/// Favorites with their count
#[must_use]
pub fn favorites_list(view: &FavoritesListView) -> String {
    if view.is_empty {
        return format!("Favorites (0)\n{NO_FAVORITES}\n");
    }
    format!(
        "Favorites ({})\n{}",
        view.count,
        recipe_list(&view.items)
    )
}
