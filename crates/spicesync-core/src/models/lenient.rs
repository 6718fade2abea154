// ABOUTME: Tolerant serde helpers for model-generated recipe JSON
// ABOUTME: Accepts numbers as strings, strings as numbers, and nulls where values are optional
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

//! Model output drifts: `"servings": "4"`, `"quantity": 2`, `"calories": "450 kcal"`.
//! These helpers read a [`Value`] first and coerce it, so one odd field never
//! rejects a whole recipe.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::recipe::{Ingredient, MeasuredIngredient, Nutrition};

/// Leading numeric prefix of a string (`"30 minutes"` -> `30.0`)
fn leading_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let end = trimmed
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map_or(trimmed.len(), |(i, _)| i);
    trimmed[..end].parse().ok()
}

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_number(s),
        _ => None,
    }
}

fn count_from_value(value: &Value) -> Option<u32> {
    let number = number_from_value(value)?;
    if !number.is_finite() || number < 0.0 || number > f64::from(u32::MAX) {
        return None;
    }
    Some(number.round() as u32)
}

fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(_) | Value::Bool(_) => Some(value.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(text_from_value(&value).unwrap_or_default())
}

pub fn optional_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(text_from_value(&value))
}

pub fn positive_count<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u32>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(count_from_value(&value).filter(|n| *n > 0))
}

pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(count_from_value(&value))
}

pub fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value)
        .filter(|n| n.is_finite())
        .unwrap_or_default())
}

pub fn ingredients<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Ingredient>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(name) => Some(Ingredient::Plain(name)),
            Value::Number(_) | Value::Bool(_) => Some(Ingredient::Plain(item.to_string())),
            Value::Object(_) => serde_json::from_value::<MeasuredIngredient>(item)
                .ok()
                .map(Ingredient::Measured),
            Value::Null | Value::Array(_) => None,
        })
        .collect())
}

/// Step lists are usually strings; some models emit `{"step": 1, "text": "..."}`
pub fn steps<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .iter()
        .filter_map(|item| match item {
            Value::Object(map) => ["text", "instruction", "description"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map(str::to_owned),
            other => text_from_value(other),
        })
        .collect())
}

pub fn nutrition<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Nutrition>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Object(_) => Ok(serde_json::from_value(value).ok()),
        _ => Ok(None),
    }
}
