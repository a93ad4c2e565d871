// ABOUTME: Recipe storage with tag links and ingredient-amount rows
// ABOUTME: Filtered listing, transactional writes, and batch association loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::mappers::{column, parse_ingredient_amount, parse_recipe, parse_tag};
use super::SqliteTransactionGuard;
use crate::errors::{AppError, AppResult};
use crate::models::{IngredientAmount, Recipe, RecipeDraft, RecipeFilter, Tag};
use crate::pagination::PageParams;

const RECIPE_COLUMNS: &str = "r.id, r.author_id, r.name, r.image, r.text, r.cooking_time, r.created_at";

/// Recipe database operations
pub struct RecipeManager {
    pool: SqlitePool,
}

impl RecipeManager {
    /// Create a new recipe manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// List one page of recipes matching `filter`, ordered by id
    ///
    /// Returns the page and the total number of matches. Filters on the
    /// requester's favorites or cart match nothing for anonymous requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list(
        &self,
        filter: &RecipeFilter,
        requester: Option<i64>,
        page: PageParams,
    ) -> AppResult<(Vec<Recipe>, i64)> {
        if filter.needs_requester() && requester.is_none() {
            return Ok((Vec::new(), 0));
        }

        let count: i64 = filtered_query("SELECT COUNT(*) FROM recipes r", filter, requester)
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count recipes: {e}")))?;

        let mut query = filtered_query(
            &format!("SELECT {RECIPE_COLUMNS} FROM recipes r"),
            filter,
            requester,
        );
        query
            .push(" ORDER BY r.id LIMIT ")
            .push_bind(page.sql_limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        let recipes = rows.iter().map(parse_recipe).collect::<AppResult<Vec<_>>>()?;
        Ok((recipes, count))
    }

    /// Get a recipe by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get(&self, id: i64) -> AppResult<Option<Recipe>> {
        let row = sqlx::query(&format!("SELECT {RECIPE_COLUMNS} FROM recipes r WHERE r.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;

        row.as_ref().map(parse_recipe).transpose()
    }

    /// Recipes written by `author_id`, ordered by id, at most `limit` when set
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn by_author(&self, author_id: i64, limit: Option<i64>) -> AppResult<Vec<Recipe>> {
        // SQLite treats a negative LIMIT as no limit
        let rows = sqlx::query(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes r WHERE r.author_id = $1 ORDER BY r.id LIMIT $2"
        ))
        .bind(author_id)
        .bind(limit.unwrap_or(-1))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list author recipes: {e}")))?;

        rows.iter().map(parse_recipe).collect()
    }

    /// Number of recipes written by `author_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count_by_author(&self, author_id: i64) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM recipes WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count author recipes: {e}")))
    }

    /// Tags of every recipe in `recipe_ids`, keyed by recipe id, ordered by tag id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn tags_for(&self, recipe_ids: &[i64]) -> AppResult<HashMap<i64, Vec<Tag>>> {
        let mut grouped: HashMap<i64, Vec<Tag>> = HashMap::new();
        if recipe_ids.is_empty() {
            return Ok(grouped);
        }

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
            r"
            SELECT rt.recipe_id, t.id, t.name, t.color, t.slug
            FROM recipe_tags rt
            JOIN tags t ON t.id = rt.tag_id
            WHERE rt.recipe_id IN (",
        );
        push_id_list(&mut query, recipe_ids);
        query.push(" ORDER BY t.id");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load recipe tags: {e}")))?;

        for row in &rows {
            let recipe_id: i64 = column(row, "recipe_id")?;
            grouped.entry(recipe_id).or_default().push(parse_tag(row)?);
        }
        Ok(grouped)
    }

    /// Ingredient amounts of every recipe in `recipe_ids`, keyed by recipe id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn ingredients_for(
        &self,
        recipe_ids: &[i64],
    ) -> AppResult<HashMap<i64, Vec<IngredientAmount>>> {
        let mut grouped: HashMap<i64, Vec<IngredientAmount>> = HashMap::new();
        if recipe_ids.is_empty() {
            return Ok(grouped);
        }

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
            r"
            SELECT ri.recipe_id, ri.ingredient_id, i.name, i.measurement_unit, ri.amount
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id IN (",
        );
        push_id_list(&mut query, recipe_ids);
        query.push(" ORDER BY ri.id");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load recipe ingredients: {e}")))?;

        for row in &rows {
            let recipe_id: i64 = column(row, "recipe_id")?;
            grouped
                .entry(recipe_id)
                .or_default()
                .push(parse_ingredient_amount(row)?);
        }
        Ok(grouped)
    }

    // ========================================================================
    // Writes (inside a caller-owned transaction)
    // ========================================================================

    /// Insert the recipe row and its associations, returning the new id
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails
    pub async fn insert(
        &self,
        guard: &mut SqliteTransactionGuard<'_>,
        author_id: i64,
        draft: &RecipeDraft,
    ) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO recipes (author_id, name, image, text, cooking_time, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(author_id)
        .bind(&draft.name)
        .bind(&draft.image)
        .bind(&draft.text)
        .bind(draft.cooking_time)
        .bind(Utc::now().to_rfc3339())
        .execute(guard.executor()?)
        .await
        .map_err(AppError::from)?;

        let recipe_id = result.last_insert_rowid();
        Self::insert_associations(guard, recipe_id, draft).await?;
        Ok(recipe_id)
    }

    /// Overwrite the scalar fields and replace every association
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the recipe vanished, or a database error
    pub async fn update(
        &self,
        guard: &mut SqliteTransactionGuard<'_>,
        recipe_id: i64,
        draft: &RecipeDraft,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r"
            UPDATE recipes SET name = $1, image = $2, text = $3, cooking_time = $4
            WHERE id = $5
            ",
        )
        .bind(&draft.name)
        .bind(&draft.image)
        .bind(&draft.text)
        .bind(draft.cooking_time)
        .bind(recipe_id)
        .execute(guard.executor()?)
        .await
        .map_err(AppError::from)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Recipe"));
        }

        for statement in [
            "DELETE FROM recipe_ingredients WHERE recipe_id = $1",
            "DELETE FROM recipe_tags WHERE recipe_id = $1",
        ] {
            sqlx::query(statement)
                .bind(recipe_id)
                .execute(guard.executor()?)
                .await
                .map_err(|e| AppError::database(format!("Failed to clear recipe associations: {e}")))?;
        }

        Self::insert_associations(guard, recipe_id, draft).await
    }

    async fn insert_associations(
        guard: &mut SqliteTransactionGuard<'_>,
        recipe_id: i64,
        draft: &RecipeDraft,
    ) -> AppResult<()> {
        if !draft.ingredients.is_empty() {
            let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
                "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) ",
            );
            query.push_values(&draft.ingredients, |mut row, entry| {
                row.push_bind(recipe_id)
                    .push_bind(entry.id)
                    .push_bind(entry.amount);
            });
            query
                .build()
                .execute(guard.executor()?)
                .await
                .map_err(AppError::from)?;
        }

        if !draft.tags.is_empty() {
            let mut query: QueryBuilder<Sqlite> =
                QueryBuilder::new("INSERT INTO recipe_tags (recipe_id, tag_id) ");
            query.push_values(&draft.tags, |mut row, tag_id| {
                row.push_bind(recipe_id).push_bind(*tag_id);
            });
            query
                .build()
                .execute(guard.executor()?)
                .await
                .map_err(AppError::from)?;
        }

        Ok(())
    }

    /// Delete a recipe; associations and relations cascade
    ///
    /// Returns whether a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn delete(&self, recipe_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete recipe: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Start a recipe query with the `WHERE` clause for `filter` applied
fn filtered_query(
    select: &str,
    filter: &RecipeFilter,
    requester: Option<i64>,
) -> QueryBuilder<'static, Sqlite> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(select);
    query.push(" WHERE 1 = 1");

    if !filter.tags.is_empty() {
        query.push(
            r" AND EXISTS (
                SELECT 1 FROM recipe_tags rt JOIN tags t ON t.id = rt.tag_id
                WHERE rt.recipe_id = r.id AND t.slug IN (",
        );
        let mut separated = query.separated(", ");
        for slug in &filter.tags {
            separated.push_bind(slug.clone());
        }
        separated.push_unseparated("))");
    }

    if let Some(author) = filter.author {
        query.push(" AND r.author_id = ").push_bind(author);
    }

    if let Some(user_id) = requester {
        if filter.is_favorited {
            query
                .push(" AND EXISTS (SELECT 1 FROM favorites f WHERE f.recipe_id = r.id AND f.user_id = ")
                .push_bind(user_id)
                .push(")");
        }
        if filter.is_in_shopping_cart {
            query
                .push(" AND EXISTS (SELECT 1 FROM shopping_carts c WHERE c.recipe_id = r.id AND c.user_id = ")
                .push_bind(user_id)
                .push(")");
        }
    }

    query
}

/// Append `id, id, ...)` to an open `IN (` clause
fn push_id_list(query: &mut QueryBuilder<'_, Sqlite>, ids: &[i64]) {
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");
}
