// ABOUTME: Recipe aggregate models with tag and ingredient-amount associations
// ABOUTME: RecipePayload merges over a stored recipe into a complete RecipeDraft
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Tag, User};
use crate::errors::{AppError, AppResult, ErrorCode};

/// A stored recipe row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe id
    pub id: i64,
    /// Owning user
    pub author_id: i64,
    /// Title, at most 200 characters
    pub name: String,
    /// Image as a base64 data URI
    pub image: String,
    /// Description and instructions
    pub text: String,
    /// Minutes, at least 1
    pub cooking_time: i64,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// An ingredient as used in one recipe, with its amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientAmount {
    /// Ingredient id
    pub id: i64,
    /// Ingredient name
    pub name: String,
    /// Measurement unit
    pub measurement_unit: String,
    /// Amount in `measurement_unit`
    pub amount: i64,
}

/// A recipe with its author, tags, and ingredient amounts loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDetails {
    /// The recipe row
    pub recipe: Recipe,
    /// The author profile
    pub author: User,
    /// Attached tags ordered by id
    pub tags: Vec<Tag>,
    /// Ingredient amounts in the order they were submitted
    pub ingredients: Vec<IngredientAmount>,
}

/// An `{id, amount}` ingredient reference in a recipe payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientEntry {
    /// Ingredient id
    pub id: i64,
    /// Amount, at least 1
    pub amount: i64,
}

/// Inbound recipe data for create and update
///
/// Every field is optional at the wire level so that missing fields are
/// reported per field instead of as a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecipePayload {
    /// Title
    pub name: Option<String>,
    /// Base64 data URI
    pub image: Option<String>,
    /// Description
    pub text: Option<String>,
    /// Minutes
    pub cooking_time: Option<i64>,
    /// Ingredient references, always required
    pub ingredients: Option<Vec<IngredientEntry>>,
    /// Tag ids, empty when absent
    pub tags: Option<Vec<i64>>,
}

/// Complete recipe data ready for validation and persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    /// Title
    pub name: String,
    /// Base64 data URI
    pub image: String,
    /// Description
    pub text: String,
    /// Minutes
    pub cooking_time: i64,
    /// Ingredient references
    pub ingredients: Vec<IngredientEntry>,
    /// Tag ids
    pub tags: Vec<i64>,
}

impl RecipePayload {
    /// Merge the payload over `current` (if any) into a complete draft
    ///
    /// Scalar fields fall back to the stored recipe. `ingredients` never
    /// falls back; `tags` falls back to the empty set.
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` listing every absent field.
    pub fn into_draft(self, current: Option<&Recipe>) -> AppResult<RecipeDraft> {
        let name = self.name.or_else(|| current.map(|r| r.name.clone()));
        let image = self.image.or_else(|| current.map(|r| r.image.clone()));
        let text = self.text.or_else(|| current.map(|r| r.text.clone()));
        let cooking_time = self.cooking_time.or_else(|| current.map(|r| r.cooking_time));

        match (name, image, text, cooking_time, self.ingredients) {
            (Some(name), Some(image), Some(text), Some(cooking_time), Some(ingredients)) => {
                Ok(RecipeDraft {
                    name,
                    image,
                    text,
                    cooking_time,
                    ingredients,
                    tags: self.tags.unwrap_or_default(),
                })
            }
            (name, image, text, cooking_time, ingredients) => {
                let missing: Vec<&str> = [
                    ("name", name.is_none()),
                    ("image", image.is_none()),
                    ("text", text.is_none()),
                    ("cooking_time", cooking_time.is_none()),
                    ("ingredients", ingredients.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, absent)| absent.then_some(field))
                .collect();
                Err(missing_fields_error(&missing))
            }
        }
    }
}

fn missing_fields_error(fields: &[&str]) -> AppError {
    let details: Map<String, Value> = fields
        .iter()
        .map(|field| {
            (
                (*field).to_owned(),
                Value::from(vec!["This field is required"]),
            )
        })
        .collect();

    AppError::new(
        ErrorCode::MissingRequiredField,
        format!("Missing required fields: {}", fields.join(", ")),
    )
    .with_details(Value::Object(details))
}

/// Filters accepted by the recipe listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    /// Recipe must carry at least one of these tag slugs
    pub tags: Vec<String>,
    /// Recipe must be written by this author
    pub author: Option<i64>,
    /// Only the requester's favorites
    pub is_favorited: bool,
    /// Only recipes in the requester's cart
    pub is_in_shopping_cart: bool,
}

impl RecipeFilter {
    /// Whether the filter restricts to the requester's own relations
    #[must_use]
    pub const fn needs_requester(&self) -> bool {
        self.is_favorited || self.is_in_shopping_cart
    }
}
