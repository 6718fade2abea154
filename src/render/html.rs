// ABOUTME: HTML fragments for recipe list cards, detail view, nutrition, and favorites
// ABOUTME: Every interpolated string passes through the HTML escaper
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

use std::fmt::Write;

use super::{
    FavoritesListView, NutritionPanelView, RecipeDetailView, RecipeSummaryView, META_SEPARATOR,
};
use crate::constants::labels::{NO_FAVORITES, NO_NUTRITION, NO_RECIPES};
use crate::utils::html::escape_html;

/// List card for one recipe; `index` is the position used by click handlers
#[must_use]
pub fn summary_card(view: &RecipeSummaryView, index: usize) -> String {
    format!(
        "<div class=\"recipe-card\" data-index=\"{index}\"><h3>{}</h3><p>{}</p></div>",
        escape_html(&view.title),
        escape_html(&view.meta),
    )
}

/// Generation results; an empty list renders the "no recipes" message
#[must_use]
pub fn recipe_list(views: &[RecipeSummaryView]) -> String {
    if views.is_empty() {
        return message(NO_RECIPES);
    }
    views
        .iter()
        .enumerate()
        .map(|(index, view)| summary_card(view, index))
        .collect()
}

/// Favorite toggle button
#[must_use]
pub fn favorite_button(view: &RecipeDetailView) -> String {
    format!(
        "<button id=\"fav-toggle-btn\" class=\"btn {}\">{}</button>",
        view.favorite.style.class(),
        escape_html(view.favorite.label),
    )
}

/// Detail view of one recipe
#[must_use]
pub fn recipe_detail(view: &RecipeDetailView) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<div class=\"recipe-header\"><div><h2>{}</h2><p class=\"muted\">{}</p></div><div>{}</div></div>",
        escape_html(&view.title),
        escape_html(&view.meta),
        favorite_button(view),
    );

    html.push_str("<h3>Ingredients</h3><ul>");
    for line in &view.ingredients {
        let _ = write!(html, "<li>{}</li>", escape_html(line));
    }
    html.push_str("</ul><h3>Steps</h3><ol>");
    for step in &view.steps {
        let _ = write!(html, "<li>{}</li>", escape_html(step));
    }
    html.push_str("</ol>");

    if let Some(notes) = &view.notes {
        let _ = write!(html, "<h3>Notes</h3><p>{}</p>", escape_html(notes));
    }
    html
}

/// Nutrition panel with its mode switch
#[must_use]
pub fn nutrition_panel(view: &NutritionPanelView) -> String {
    match view {
        NutritionPanelView::Unavailable => message(NO_NUTRITION),
        NutritionPanelView::Available(figures) => format!(
            "<h3>{}</h3><ul><li>Calories: {}</li><li>Protein: {}</li><li>Carbs: {}</li><li>Fat: {}</li></ul>\
             <button id=\"toggle-nutrition\">{}</button>",
            escape_html(&figures.heading),
            escape_html(&figures.calories),
            escape_html(&figures.protein),
            escape_html(&figures.carbs),
            escape_html(&figures.fat),
            escape_html(&figures.switch_label),
        ),
    }
}

/// Favorites panel body and count badge
#[must_use]
pub fn favorites_list(view: &FavoritesListView) -> String {
    let mut html = format!("<span id=\"fav-count\">{}</span>", view.count);
    if view.is_empty {
        let _ = write!(html, "<p id=\"no-favs\">{}</p>", escape_html(NO_FAVORITES));
        return html;
    }
    for (index, item) in view.items.iter().enumerate() {
        let _ = write!(
            html,
            "<div class=\"favorite-item\" data-index=\"{index}\"><div><div class=\"favorite-title\">{}</div>\
             <div class=\"favorite-meta\">{}</div></div><div><button class=\"btn view\">View</button>\
             <button class=\"btn danger remove\">Remove</button></div></div>",
            escape_html(&item.title),
            escape_html(&item.meta),
        );
    }
    html
}

/// Paragraph holding a status message
#[must_use]
pub fn message(text: &str) -> String {
    format!("<p>{}</p>", escape_html(text))
}

/// Pre-formatted diagnostic block, e.g. the raw API payload
#[must_use]
pub fn raw_block(text: &str) -> String {
    format!("<pre id=\"raw-output\">{}</pre>", escape_html(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, Nutrition, Recipe};
    use crate::render::NutritionMode;

    #[test]
    fn test_model_text_is_escaped() {
        let recipe = Recipe::new("<b>Soup</b>")
            .with_ingredients(vec![Ingredient::measured("onion & leek", "1 \"big\"")])
            .with_steps(["<script>x</script>"])
            .with_notes("Chef's <i>tip</i>");
        let html = recipe_detail(&RecipeDetailView::from_recipe(&recipe, false));

        assert!(html.contains("&lt;b&gt;Soup&lt;/b&gt;"));
        assert!(html.contains("onion &amp; leek"));
        assert!(html.contains("&quot;big&quot;"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("Chef's"));
        assert!(html.contains("class=\"btn primary\">Save to favorites</button>"));
    }

    #[test]
    fn test_empty_list_message() {
        assert_eq!(recipe_list(&[]), "<p>No recipes generated.</p>");
    }

    #[test]
    fn test_summary_card() {
        let view = RecipeSummaryView::from_recipe(&Recipe::new("").with_servings(2));
        assert_eq!(
            summary_card(&view, 0),
            "<div class=\"recipe-card\" data-index=\"0\"><h3>Untitled recipe</h3><p>2 servings</p></div>"
        );
        assert!(META_SEPARATOR.contains('\u{2022}'));
    }

    #[test]
    fn test_nutrition_panel() {
        assert_eq!(
            nutrition_panel(&NutritionPanelView::Unavailable),
            "<p>No nutrition info available.</p>"
        );
        let view = NutritionPanelView::new(
            Some(Nutrition {
                calories: 480.0,
                ..Nutrition::default()
            }),
            None,
            NutritionMode::WholeRecipe,
        );
        let html = nutrition_panel(&view);
        assert!(html.contains("<h3>Nutrition (Whole Recipe)</h3>"));
        assert!(html.contains("Calories: 480 kcal"));
        assert!(html.contains("Switch to Per Serving"));
    }

    #[test]
    fn test_favorites_list() {
        let empty = favorites_list(&FavoritesListView::from_recipes(&[]));
        assert!(empty.contains("<span id=\"fav-count\">0</span>"));
        assert!(empty.contains("No favorites yet."));

        let html = favorites_list(&FavoritesListView::from_recipes(&[Recipe::new("A")]));
        assert!(html.contains(">1</span>"));
        assert!(html.contains("favorite-title\">A<"));
    }
}
