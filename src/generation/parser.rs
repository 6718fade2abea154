// ABOUTME: Parses chat-completion text into recipes or keeps it as raw text
// ABOUTME: Tolerates code fences, bare arrays, single objects, and surrounding prose
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{Nutrition, Recipe};

/// Outcome of interpreting a model completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParsedOutput {
    /// Recipes decoded from JSON (possibly none)
    Structured(Vec<Recipe>),
    /// The completion was not recognizable JSON
    RawText(String),
}

impl ParsedOutput {
    /// Interpret a completion
    ///
    /// Accepted shapes, after removing Markdown fences: `{"recipes": [...]}`,
    /// `{"recipe": {...}}`, a bare array of recipes, or one recipe object.
    /// When the text is not JSON, the outermost `{...}` or `[...]` block is
    /// tried before giving up.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let Some(value) = parse_json_block(content) else {
            debug!("Completion is not JSON, keeping raw text");
            return Self::RawText(content.to_owned());
        };

        recipes_from_value(value).map_or_else(|| Self::RawText(content.to_owned()), Self::Structured)
    }

    /// Recipes, empty for raw text
    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        match self {
            Self::Structured(recipes) => recipes,
            Self::RawText(_) => &[],
        }
    }
}

/// Interpret a nutrition completion: either the facts object itself or
/// `{"nutrition": {...}}`
#[must_use]
pub fn parse_nutrition(content: &str) -> Option<Nutrition> {
    let value = parse_json_block(content)?;
    let object = match value {
        Value::Object(mut map) => match map.remove("nutrition") {
            Some(inner @ Value::Object(_)) => inner,
            _ => Value::Object(map),
        },
        _ => return None,
    };
    let has_any_field = ["calories", "protein_g", "carbs_g", "fat_g"]
        .iter()
        .any(|key| object.get(key).is_some());
    if !has_any_field {
        return None;
    }
    serde_json::from_value(object).ok()
}

/// Remove a surrounding ```` ```json ... ``` ```` fence
#[must_use]
pub fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`, `JSON`, ...) on the opening line
    let body = rest.find('\n').map_or("", |newline| &rest[newline + 1..]);
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

fn parse_json_block(content: &str) -> Option<Value> {
    let stripped = strip_code_fences(content);
    if let Ok(value) = serde_json::from_str(stripped) {
        return Some(value);
    }

    let start = stripped.find(['{', '['])?;
    let closing = if stripped[start..].starts_with('{') {
        '}'
    } else {
        ']'
    };
    let end = stripped.rfind(closing)?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&stripped[start..=end]).ok()
}

fn recipes_from_value(value: Value) -> Option<Vec<Recipe>> {
    match value {
        Value::Array(items) => recipes_from_items(items),
        Value::Object(mut map) => {
            if let Some(Value::Array(items)) = map.remove("recipes") {
                return recipes_from_items(items);
            }
            if let Some(inner @ Value::Object(_)) = map.remove("recipe") {
                return recipes_from_items(vec![inner]);
            }
            let looks_like_recipe = map.contains_key("title")
                || map.contains_key("ingredients")
                || map.contains_key("steps");
            if looks_like_recipe {
                recipes_from_items(vec![Value::Object(map)])
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Decode each object; `None` when items exist but none of them is a recipe
fn recipes_from_items(items: Vec<Value>) -> Option<Vec<Recipe>> {
    let total = items.len();
    let recipes: Vec<Recipe> = items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(recipe) => Some(recipe),
            Err(e) => {
                warn!("Skipping undecodable recipe: {e}");
                None
            }
        })
        .collect();

    if total > 0 && recipes.is_empty() {
        return None;
    }
    if recipes.len() < total {
        warn!(
            kept = recipes.len(),
            total, "Dropped non-recipe entries from completion"
        );
    }
    Some(recipes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipes_envelope() {
        let parsed = ParsedOutput::parse(
            r#"{"recipes":[{"title":"Soup","ingredients":["Carrot"]},{"title":"Stew"}]}"#,
        );
        let recipes = parsed.recipes();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].title, "Soup");
        assert_eq!(recipes[1].title, "Stew");
    }

    #[test]
    fn test_single_object_from_fenced_block() {
        let content = "```json\n{\"title\": \"Omelette\", \"servings\": \"2\"}\n```";
        let parsed = ParsedOutput::parse(content);
        assert_eq!(parsed.recipes().len(), 1);
        assert_eq!(parsed.recipes()[0].servings, Some(2));
    }

    #[test]
    fn test_bare_array_and_nested_recipe() {
        assert_eq!(ParsedOutput::parse(r#"[{"title":"A"}]"#).recipes().len(), 1);
        assert_eq!(
            ParsedOutput::parse(r#"{"recipe":{"title":"B"}}"#).recipes()[0].title,
            "B"
        );
    }

    #[test]
    fn test_empty_recipes_is_structured() {
        assert_eq!(
            ParsedOutput::parse(r#"{"recipes": []}"#),
            ParsedOutput::Structured(Vec::new())
        );
    }

    #[test]
    fn test_prose_around_json_is_tolerated() {
        let content = "Sure! Here you go:\n{\"recipes\":[{\"title\":\"Salad\"}]}\nEnjoy.";
        assert_eq!(ParsedOutput::parse(content).recipes()[0].title, "Salad");
    }

    #[test]
    fn test_plain_text_is_raw() {
        let content = "I cannot make a recipe from that.";
        assert_eq!(
            ParsedOutput::parse(content),
            ParsedOutput::RawText(content.to_owned())
        );
    }

    #[test]
    fn test_unrelated_json_is_raw() {
        let content = r#"{"answer": 42}"#;
        assert!(matches!(
            ParsedOutput::parse(content),
            ParsedOutput::RawText(_)
        ));
        assert!(matches!(
            ParsedOutput::parse(r#"["just", "strings"]"#),
            ParsedOutput::RawText(_)
        ));
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn test_parse_nutrition_shapes() {
        let direct = parse_nutrition(r#"{"calories": 900, "protein_g": "30 g"}"#).unwrap();
        assert!((direct.protein_g - 30.0).abs() < f64::EPSILON);

        let wrapped = parse_nutrition(r#"{"nutrition": {"calories": 500}}"#).unwrap();
        assert!((wrapped.calories - 500.0).abs() < f64::EPSILON);

        assert_eq!(parse_nutrition("no idea"), None);
        assert_eq!(parse_nutrition(r#"{"title": "Soup"}"#), None);
    }
}
