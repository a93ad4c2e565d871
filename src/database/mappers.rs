// ABOUTME: SQLite row to model conversion helpers
// ABOUTME: Shared by every manager so column errors read the same everywhere
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite};

use crate::errors::{AppError, AppResult};
use crate::models::{IngredientAmount, Ingredient, Recipe, Tag, User};

/// Read one column, naming it in the error
///
/// # Errors
///
/// Returns a database error if the column is missing or has the wrong type
pub fn column<'r, T>(row: &'r SqliteRow, name: &str) -> AppResult<T>
where
    T: sqlx::Decode<'r, Sqlite> + sqlx::Type<Sqlite>,
{
    row.try_get(name)
        .map_err(|e| AppError::database(format!("Failed to get column '{name}': {e}")))
}

/// Read an RFC 3339 text column as a UTC timestamp
///
/// # Errors
///
/// Returns a database error if the column is missing or not RFC 3339
pub fn timestamp(row: &SqliteRow, name: &str) -> AppResult<DateTime<Utc>> {
    let raw: String = column(row, name)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid timestamp in '{name}': {e}")))
}

/// Parse a `users` row
///
/// # Errors
///
/// Returns an error if a column is missing or malformed
pub fn parse_user(row: &SqliteRow) -> AppResult<User> {
    Ok(User {
        id: column(row, "id")?,
        email: column(row, "email")?,
        username: column(row, "username")?,
        first_name: column(row, "first_name")?,
        last_name: column(row, "last_name")?,
        created_at: timestamp(row, "created_at")?,
    })
}

/// Parse an `ingredients` row
///
/// # Errors
///
/// Returns an error if a column is missing or malformed
pub fn parse_ingredient(row: &SqliteRow) -> AppResult<Ingredient> {
    Ok(Ingredient {
        id: column(row, "id")?,
        name: column(row, "name")?,
        measurement_unit: column(row, "measurement_unit")?,
    })
}

/// Parse a `tags` row
///
/// # Errors
///
/// Returns an error if a column is missing or malformed
pub fn parse_tag(row: &SqliteRow) -> AppResult<Tag> {
    Ok(Tag {
        id: column(row, "id")?,
        name: column(row, "name")?,
        color: column(row, "color")?,
        slug: column(row, "slug")?,
    })
}

/// Parse a `recipes` row
///
/// # Errors
///
/// Returns an error if a column is missing or malformed
pub fn parse_recipe(row: &SqliteRow) -> AppResult<Recipe> {
    Ok(Recipe {
        id: column(row, "id")?,
        author_id: column(row, "author_id")?,
        name: column(row, "name")?,
        image: column(row, "image")?,
        text: column(row, "text")?,
        cooking_time: column(row, "cooking_time")?,
        created_at: timestamp(row, "created_at")?,
    })
}

/// Parse a `recipe_ingredients` row joined with its ingredient
///
/// # Errors
///
/// Returns an error if a column is missing or malformed
pub fn parse_ingredient_amount(row: &SqliteRow) -> AppResult<IngredientAmount> {
    Ok(IngredientAmount {
        id: column(row, "ingredient_id")?,
        name: column(row, "name")?,
        measurement_unit: column(row, "measurement_unit")?,
        amount: column(row, "amount")?,
    })
}
