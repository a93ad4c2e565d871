// ABOUTME: Ingredient and tag reference catalog models
// ABOUTME: Read-only at the API surface, populated by the data loader
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::tags::DEFAULT_COLOR;

/// An ingredient with its measurement unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient id
    pub id: i64,
    /// Display name, e.g. "flour"
    pub name: String,
    /// Unit the amount is expressed in, e.g. "g"
    pub measurement_unit: String,
}

/// A recipe tag such as "breakfast"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Hex color `#RRGGBB`
    pub color: String,
    /// URL-safe unique slug
    pub slug: String,
}

/// Ingredient record as found in import files
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewIngredient {
    /// Display name
    pub name: String,
    /// Measurement unit
    pub measurement_unit: String,
}

/// Tag record as found in import files
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewTag {
    /// Display name
    pub name: String,
    /// Hex color, white when absent
    #[serde(default = "default_color")]
    pub color: String,
    /// Unique slug
    pub slug: String,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_owned()
}
