// ABOUTME: Explicit UI state shared by request building and rendering
// ABOUTME: Holds cuisine, language, result list, current recipe, and nutrition mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

use super::GenerationOutcome;
use crate::constants::generation::{DEFAULT_CUISINE, DEFAULT_LANGUAGE};
use crate::generation::GenerateRequest;
use crate::models::Recipe;
use crate::render::{NutritionMode, NutritionPanelView, RecipeDetailView};

/// UI state of one client session
#[derive(Debug, Clone, PartialEq)]
pub struct UiContext {
    /// Selected cuisine, `any` by default
    pub cuisine: String,
    /// Selected output language, `en` by default
    pub language: String,
    /// Recipes of the last successful generation
    pub results: Vec<Recipe>,
    /// Recipe open in the detail view
    pub current_recipe: Option<Recipe>,
    /// Basis of the nutrition panel
    pub nutrition_mode: NutritionMode,
}

impl Default for UiContext {
    fn default() -> Self {
        Self {
            cuisine: DEFAULT_CUISINE.to_owned(),
            language: DEFAULT_LANGUAGE.to_owned(),
            results: Vec::new(),
            current_recipe: None,
            nutrition_mode: NutritionMode::default(),
        }
    }
}

impl UiContext {
    /// Fresh session state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a cuisine; blank selects `any`
    pub fn select_cuisine(&mut self, cuisine: &str) {
        self.cuisine = non_blank_or(cuisine, DEFAULT_CUISINE);
    }

    /// Select an output language; blank selects `en`
    pub fn select_language(&mut self, language: &str) {
        self.language = non_blank_or(language, DEFAULT_LANGUAGE);
    }

    /// Request for `ingredients`, `None` when they are blank
    #[must_use]
    pub fn build_request(&self, ingredients: &str) -> Option<GenerateRequest> {
        let ingredients = ingredients.trim();
        if ingredients.is_empty() {
            return None;
        }
        Some(
            GenerateRequest::new(ingredients)
                .with_cuisine(&self.cuisine)
                .with_language(&self.language),
        )
    }

    /// Update the result area after a generation attempt
    ///
    /// Successful outcomes replace the list and close the detail view.
    /// Input rejections leave the state untouched.
    pub fn apply(&mut self, outcome: &GenerationOutcome) {
        match outcome {
            GenerationOutcome::EmptyInput | GenerationOutcome::Busy => {}
            GenerationOutcome::Recipes { recipes } => {
                self.results.clone_from(recipes);
                self.current_recipe = None;
            }
            GenerationOutcome::NoResults
            | GenerationOutcome::Unstructured { .. }
            | GenerationOutcome::ApiError { .. }
            | GenerationOutcome::NetworkError { .. } => {
                self.results.clear();
                self.current_recipe = None;
            }
        }
    }

    /// Open the result at `index` in the detail view
    pub fn open_result(&mut self, index: usize) -> Option<&Recipe> {
        let recipe = self.results.get(index)?.clone();
        self.current_recipe = Some(recipe);
        self.current_recipe.as_ref()
    }

    /// Open any recipe, e.g. a favorite, in the detail view
    pub fn open_recipe(&mut self, recipe: Recipe) {
        self.current_recipe = Some(recipe);
    }

    /// Flip per-serving and whole-recipe nutrition
    pub fn toggle_nutrition_mode(&mut self) -> NutritionMode {
        self.nutrition_mode = self.nutrition_mode.toggled();
        self.nutrition_mode
    }

    /// Detail view of the current recipe
    #[must_use]
    pub fn detail_view(&self, favorited: bool) -> Option<RecipeDetailView> {
        self.current_recipe
            .as_ref()
            .map(|recipe| RecipeDetailView::from_recipe(recipe, favorited))
    }

    /// Nutrition panel of the current recipe in the current mode
    #[must_use]
    pub fn nutrition_view(&self) -> Option<NutritionPanelView> {
        self.current_recipe
            .as_ref()
            .map(|recipe| NutritionPanelView::for_recipe(recipe, self.nutrition_mode))
    }
}

fn non_blank_or(value: &str, default: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        default.to_owned()
    } else {
        value.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_ingredients_build_no_request() {
        let context = UiContext::new();
        assert_eq!(context.build_request("   "), None);
    }

    #[test]
    fn test_request_carries_selection() {
        let mut context = UiContext::new();
        context.select_cuisine("Mexican");
        context.select_language("es");
        let request = context.build_request(" beans ").unwrap();

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"ingredients": "beans", "cuisine": "Mexican", "language": "es"})
        );

        context.select_cuisine("");
        assert_eq!(context.cuisine, "any");
    }

    #[test]
    fn test_apply_and_open() {
        let mut context = UiContext::new();
        context.apply(&GenerationOutcome::Recipes {
            recipes: vec![Recipe::new("A"), Recipe::new("B")],
        });
        assert_eq!(context.open_result(1).unwrap().title, "B");
        assert!(context.detail_view(false).is_some());

        context.apply(&GenerationOutcome::EmptyInput);
        assert_eq!(context.results.len(), 2);
        assert!(context.current_recipe.is_some());

        context.apply(&GenerationOutcome::NoResults);
        assert!(context.results.is_empty());
        assert!(context.current_recipe.is_none());
    }

    #[test]
    fn test_nutrition_mode_toggle() {
        let mut context = UiContext::new();
        assert_eq!(context.nutrition_mode, NutritionMode::PerServing);
        assert_eq!(context.toggle_nutrition_mode(), NutritionMode::WholeRecipe);
        context.open_recipe(Recipe::new("A"));
        assert_eq!(
            context.nutrition_view(),
            Some(NutritionPanelView::Unavailable)
        );
    }
}
