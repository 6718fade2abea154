// ABOUTME: Recipe data model shared by generation, favorites, and rendering
// ABOUTME: Defines Recipe, Ingredient, MeasuredIngredient, and Nutrition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

use serde::{Deserialize, Serialize};

use super::lenient;

/// A generated or saved recipe
///
/// Serialization always emits exactly the documented fields, which is also
/// the persisted favorites schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe title, may be empty
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    /// Number of servings, always positive when present
    #[serde(default, deserialize_with = "lenient::positive_count")]
    pub servings: Option<u32>,
    /// Approximate total time in minutes
    #[serde(default, deserialize_with = "lenient::count")]
    pub time_minutes: Option<u32>,
    /// Ordered ingredient list
    #[serde(default, deserialize_with = "lenient::ingredients")]
    pub ingredients: Vec<Ingredient>,
    /// Ordered preparation steps
    #[serde(default, deserialize_with = "lenient::steps")]
    pub steps: Vec<String>,
    /// Free-form notes
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub notes: Option<String>,
    /// Nutrition facts for the whole recipe
    #[serde(default, deserialize_with = "lenient::nutrition")]
    pub nutrition: Option<Nutrition>,
}

impl Recipe {
    /// Create a recipe with a title and no other content
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the ingredient list
    #[must_use]
    pub fn with_ingredients(mut self, ingredients: Vec<Ingredient>) -> Self {
        self.ingredients = ingredients;
        self
    }

    /// Set the steps
    #[must_use]
    pub fn with_steps<S: Into<String>>(mut self, steps: impl IntoIterator<Item = S>) -> Self {
        self.steps = steps.into_iter().map(Into::into).collect();
        self
    }

    /// Set the serving count; zero clears it
    #[must_use]
    pub fn with_servings(mut self, servings: u32) -> Self {
        self.servings = Some(servings).filter(|n| *n > 0);
        self
    }

    /// Set the total time
    #[must_use]
    pub const fn with_time_minutes(mut self, minutes: u32) -> Self {
        self.time_minutes = Some(minutes);
        self
    }

    /// Set the notes
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Set the nutrition facts
    #[must_use]
    pub const fn with_nutrition(mut self, nutrition: Nutrition) -> Self {
        self.nutrition = Some(nutrition);
        self
    }

    /// Ingredient display names in order
    pub fn ingredient_names(&self) -> impl Iterator<Item = &str> {
        self.ingredients.iter().map(Ingredient::display_name)
    }

    /// Copy holding only well-formed values, as stored in favorites
    ///
    /// Blank notes and blank steps are dropped and a zero serving count is
    /// cleared. Title and ingredients are kept untouched so the identity of
    /// the copy matches the identity of the original.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            title: self.title.clone(),
            servings: self.servings.filter(|n| *n > 0),
            time_minutes: self.time_minutes,
            ingredients: self.ingredients.clone(),
            steps: self
                .steps
                .iter()
                .filter(|step| !step.trim().is_empty())
                .cloned()
                .collect(),
            notes: self
                .notes
                .as_ref()
                .filter(|notes| !notes.trim().is_empty())
                .cloned(),
            nutrition: self.nutrition,
        }
    }
}

/// An ingredient line: either free text or a name with a quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ingredient {
    /// Free text such as `"2 carrots"`
    Plain(String),
    /// Structured `{name, quantity}` pair
    Measured(MeasuredIngredient),
}

impl Ingredient {
    /// Plain ingredient
    #[must_use]
    pub fn plain(name: impl Into<String>) -> Self {
        Self::Plain(name.into())
    }

    /// Ingredient with a quantity
    #[must_use]
    pub fn measured(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self::Measured(MeasuredIngredient {
            name: name.into(),
            quantity: Some(quantity.into()),
        })
    }

    /// Name used for identity and display
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Plain(name) => name,
            Self::Measured(item) => &item.name,
        }
    }

    /// Quantity, when one is known and not blank
    #[must_use]
    pub fn quantity(&self) -> Option<&str> {
        match self {
            Self::Plain(_) => None,
            Self::Measured(item) => item.quantity.as_deref().filter(|q| !q.trim().is_empty()),
        }
    }
}

/// Structured ingredient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasuredIngredient {
    /// Ingredient name, empty when the model omitted it
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    /// Quantity with unit, e.g. `"200 g"`
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<String>,
}

/// Nutrition facts, absolute values for the whole recipe
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    /// Energy in kcal
    #[serde(default, deserialize_with = "lenient::amount")]
    pub calories: f64,
    /// Protein in grams
    #[serde(default, deserialize_with = "lenient::amount")]
    pub protein_g: f64,
    /// Carbohydrates in grams
    #[serde(default, deserialize_with = "lenient::amount")]
    pub carbs_g: f64,
    /// Fat in grams
    #[serde(default, deserialize_with = "lenient::amount")]
    pub fat_g: f64,
}

impl Nutrition {
    /// Multiply every value by `factor`
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein_g: self.protein_g * factor,
            carbs_g: self.carbs_g * factor,
            fat_g: self.fat_g * factor,
        }
    }

    /// Values for one serving; unknown serving counts divide by one
    #[must_use]
    pub fn per_serving(&self, servings: Option<u32>) -> Self {
        let divisor = servings.filter(|n| *n > 0).unwrap_or(1);
        self.scaled(1.0 / f64::from(divisor))
    }
}
