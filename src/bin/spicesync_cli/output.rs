// ABOUTME: Chooses between the plain text and HTML renderers for CLI output
// ABOUTME: Every command prints view models through this one switch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

use spicesync::render::{
    html, text, FavoritesListView, NutritionPanelView, RecipeDetailView, RecipeSummaryView,
};

/// Output renderer selected by `--html`
#[derive(Debug, Clone, Copy)]
pub struct Output {
    html: bool,
}

impl Output {
    /// Renderer for plain text, or HTML when `html` is set
    pub const fn new(html: bool) -> Self {
        Self { html }
    }

    /// Result list
    pub fn recipe_list(self, views: &[RecipeSummaryView]) {
        if self.html {
            println!("{}", html::recipe_list(views));
        } else {
            print!("{}", text::recipe_list(views));
        }
    }

    /// Detail view followed by its nutrition panel
    pub fn recipe_detail(self, view: &RecipeDetailView, nutrition: &NutritionPanelView) {
        if self.html {
            println!("{}", html::recipe_detail(view));
            println!("{}", html::nutrition_panel(nutrition));
        } else {
            print!("{}", text::recipe_detail(view));
            print!("{}", text::nutrition_panel(nutrition));
        }
    }

    /// Favorites list with count
    pub fn favorites(self, view: &FavoritesListView) {
        if self.html {
            println!("{}", html::favorites_list(view));
        } else {
            print!("{}", text::favorites_list(view));
        }
    }

    /// Status line
    pub fn message(self, message: &str) {
        if self.html {
            println!("{}", html::message(message));
        } else {
            println!("{message}");
        }
    }

    /// Diagnostics payload
    pub fn raw(self, raw: &str) {
        if self.html {
            println!("{}", html::raw_block(raw));
        } else {
            println!("{raw}");
        }
    }
}
