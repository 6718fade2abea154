// ABOUTME: System prompts and user prompt builders for recipe and nutrition requests
// ABOUTME: System prompts are loaded at compile time from markdown files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

//! # Prompts
//!
//! System prompts live in markdown files next to this module. User prompts
//! are built per request and always spell out the exact JSON shape expected
//! back, because the parser only understands that shape.

use std::fmt::Write;

use crate::constants::generation::DEFAULT_CUISINE;
use crate::models::{Ingredient, Recipe};

/// Recipe assistant system prompt
pub const RECIPE_SYSTEM_PROMPT: &str = include_str!("recipe_system.md");

/// Nutrition estimator system prompt
pub const NUTRITION_SYSTEM_PROMPT: &str = include_str!("nutrition_system.md");

const RECIPE_SCHEMA: &str = r#"{
  "recipes": [
    {
      "title": string,
      "servings": number (if known),
      "time_minutes": number (approx),
      "ingredients": [{"name": string, "quantity": string (optional)}],
      "steps": [string, ...],
      "notes": string (optional),
      "nutrition": {"calories": number, "protein_g": number, "carbs_g": number, "fat_g": number} (whole recipe, optional)
    }
  ]
}"#;

const NUTRITION_SCHEMA: &str =
    r#"{"calories": number, "protein_g": number, "carbs_g": number, "fat_g": number}"#;

/// Human readable name for a language code; unknown codes are used as given
#[must_use]
pub fn language_name(code: &str) -> &str {
    match code.trim().to_lowercase().as_str() {
        "en" => "English",
        "fr" => "French",
        "es" => "Spanish",
        "de" => "German",
        "it" => "Italian",
        "pt" => "Portuguese",
        "ar" => "Arabic",
        "hi" => "Hindi",
        "zh" => "Chinese",
        "ja" => "Japanese",
        _ => code.trim(),
    }
}

/// Build the user prompt asking for `count` recipes
///
/// The cuisine is left out when it is `any` or blank.
#[must_use]
pub fn recipe_user_prompt(ingredients: &str, cuisine: &str, language: &str, count: u8) -> String {
    let cuisine = cuisine.trim();
    let mut prompt = String::new();

    let noun = if count == 1 { "recipe" } else { "recipes" };
    if cuisine.is_empty() || cuisine.eq_ignore_ascii_case(DEFAULT_CUISINE) {
        let _ = write!(prompt, "Create {count} distinct {noun}");
    } else {
        let _ = write!(prompt, "Create {count} distinct {cuisine} {noun}");
    }
    let _ = writeln!(
        prompt,
        " using the following ingredients: {}.",
        ingredients.trim()
    );
    let _ = writeln!(
        prompt,
        "Write every text field in {}.",
        language_name(language)
    );
    let _ = write!(
        prompt,
        "Return the result as strict JSON (no extra commentary) with this shape:\n{RECIPE_SCHEMA}"
    );
    prompt
}

/// Build the user prompt asking for a nutrition estimate of `recipe`
#[must_use]
pub fn nutrition_user_prompt(recipe: &Recipe) -> String {
    let mut prompt = String::from("Estimate the nutrition facts of this recipe.\n");
    if !recipe.title.trim().is_empty() {
        let _ = writeln!(prompt, "Title: {}", recipe.title.trim());
    }
    if let Some(servings) = recipe.servings {
        let _ = writeln!(prompt, "Servings: {servings}");
    }
    prompt.push_str("Ingredients:\n");
    for ingredient in &recipe.ingredients {
        match ingredient {
            Ingredient::Plain(text) => {
                let _ = writeln!(prompt, "- {text}");
            }
            Ingredient::Measured(_) => match ingredient.quantity() {
                Some(quantity) => {
                    let _ = writeln!(prompt, "- {quantity} {}", ingredient.display_name());
                }
                None => {
                    let _ = writeln!(prompt, "- {}", ingredient.display_name());
                }
            },
        }
    }
    let _ = write!(
        prompt,
        "Return strict JSON for the whole recipe with this shape:\n{NUTRITION_SCHEMA}"
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_cuisine_is_omitted() {
        let prompt = recipe_user_prompt("carrot, onion", "any", "en", 3);
        assert!(prompt.starts_with("Create 3 distinct recipes using the following ingredients: carrot, onion."));
        assert!(prompt.contains("in English"));
        assert!(prompt.contains("\"recipes\""));
    }

    #[test]
    fn test_cuisine_and_language_are_included() {
        let prompt = recipe_user_prompt("rice", "Italian", "fr", 1);
        assert!(prompt.starts_with("Create 1 distinct Italian recipe using"));
        assert!(prompt.contains("in French"));
    }

    #[test]
    fn test_unknown_language_code_passes_through() {
        assert_eq!(language_name("sw"), "sw");
        assert_eq!(language_name(" EN "), "English");
    }

    #[test]
    fn test_nutrition_prompt_lists_quantities() {
        let recipe = Recipe::new("Soup")
            .with_servings(2)
            .with_ingredients(vec![
                Ingredient::measured("carrot", "200 g"),
                Ingredient::plain("salt"),
            ]);
        let prompt = nutrition_user_prompt(&recipe);
        assert!(prompt.contains("Title: Soup"));
        assert!(prompt.contains("Servings: 2"));
        assert!(prompt.contains("- 200 g carrot"));
        assert!(prompt.contains("- salt"));
        assert!(prompt.contains("protein_g"));
    }

    #[test]
    fn test_system_prompts_demand_json() {
        assert!(RECIPE_SYSTEM_PROMPT.contains("strict JSON"));
        assert!(NUTRITION_SYSTEM_PROMPT.contains("strict JSON"));
    }
}
