// ABOUTME: Ingredient and tag reference data storage
// ABOUTME: Read-only listing for the API plus inserts used by the bulk loader
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::mappers::{parse_ingredient, parse_tag};
use crate::errors::{AppError, AppResult};
use crate::models::{Ingredient, NewIngredient, NewTag, Tag};

/// Ingredient and tag database operations
pub struct CatalogManager {
    pool: SqlitePool,
}

impl CatalogManager {
    /// Create a new catalog manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Ingredients
    // ========================================================================

    /// List ingredients ordered by id, optionally by case-insensitive name prefix
    ///
    /// Case is folded in Rust on both sides, since `SQLite`'s `LOWER()` only
    /// folds ASCII.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_ingredients(&self, name_prefix: Option<&str>) -> AppResult<Vec<Ingredient>> {
        let rows = match name_prefix.filter(|prefix| !prefix.is_empty()) {
            Some(prefix) => {
                sqlx::query(
                    r"
                    SELECT id, name, measurement_unit FROM ingredients
                    WHERE name_lower LIKE $1 ESCAPE '\'
                    ORDER BY id
                    ",
                )
                .bind(format!("{}%", escape_like(&prefix.to_lowercase())))
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query("SELECT id, name, measurement_unit FROM ingredients ORDER BY id")
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| AppError::database(format!("Failed to list ingredients: {e}")))?;

        rows.iter().map(parse_ingredient).collect()
    }

    /// Get an ingredient by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_ingredient(&self, id: i64) -> AppResult<Option<Ingredient>> {
        let row = sqlx::query("SELECT id, name, measurement_unit FROM ingredients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get ingredient: {e}")))?;

        row.as_ref().map(parse_ingredient).transpose()
    }

    /// Insert an ingredient
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the (name, unit) pair is taken
    pub async fn create_ingredient(&self, ingredient: &NewIngredient) -> AppResult<Ingredient> {
        let result = sqlx::query(
            "INSERT INTO ingredients (name, name_lower, measurement_unit) VALUES ($1, $2, $3)",
        )
        .bind(&ingredient.name)
        .bind(ingredient.name.to_lowercase())
        .bind(&ingredient.measurement_unit)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(Ingredient {
            id: result.last_insert_rowid(),
            name: ingredient.name.clone(),
            measurement_unit: ingredient.measurement_unit.clone(),
        })
    }

    /// Ids from `ids` with no ingredient row, in input order
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn missing_ingredient_ids(&self, ids: &[i64]) -> AppResult<Vec<i64>> {
        self.missing_ids("ingredients", ids).await
    }

    // ========================================================================
    // Tags
    // ========================================================================

    /// List all tags ordered by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_tags(&self) -> AppResult<Vec<Tag>> {
        let rows = sqlx::query("SELECT id, name, color, slug FROM tags ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list tags: {e}")))?;

        rows.iter().map(parse_tag).collect()
    }

    /// Get a tag by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_tag(&self, id: i64) -> AppResult<Option<Tag>> {
        let row = sqlx::query("SELECT id, name, color, slug FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get tag: {e}")))?;

        row.as_ref().map(parse_tag).transpose()
    }

    /// Insert a tag
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the slug is taken
    pub async fn create_tag(&self, tag: &NewTag) -> AppResult<Tag> {
        let result = sqlx::query("INSERT INTO tags (name, color, slug) VALUES ($1, $2, $3)")
            .bind(&tag.name)
            .bind(&tag.color)
            .bind(&tag.slug)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(Tag {
            id: result.last_insert_rowid(),
            name: tag.name.clone(),
            color: tag.color.clone(),
            slug: tag.slug.clone(),
        })
    }

    /// Ids from `ids` with no tag row, in input order
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn missing_tag_ids(&self, ids: &[i64]) -> AppResult<Vec<i64>> {
        self.missing_ids("tags", ids).await
    }

    async fn missing_ids(&self, table: &str, ids: &[i64]) -> AppResult<Vec<i64>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT id FROM {table} WHERE id IN ("));
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let found: HashSet<i64> = query
            .build_query_scalar::<i64>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up {table}: {e}")))?
            .into_iter()
            .collect();

        Ok(ids.iter().copied().filter(|id| !found.contains(id)).collect())
    }
}

/// Escape `LIKE` wildcards so a prefix matches literally
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
