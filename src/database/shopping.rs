// ABOUTME: Source rows for the shopping-list export
// ABOUTME: Every ingredient amount of every recipe in one user's cart
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use sqlx::SqlitePool;

use super::mappers::column;
use crate::errors::{AppError, AppResult};
use crate::models::ShoppingListItem;

/// Shopping-list database operations
pub struct ShoppingManager {
    pool: SqlitePool,
}

impl ShoppingManager {
    /// Create a new shopping manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Unaggregated ingredient rows of every recipe in the user's cart
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn cart_ingredient_rows(&self, user_id: i64) -> AppResult<Vec<ShoppingListItem>> {
        let rows = sqlx::query(
            r"
            SELECT i.name, i.measurement_unit, ri.amount
            FROM shopping_carts c
            JOIN recipe_ingredients ri ON ri.recipe_id = c.recipe_id
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE c.user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load shopping cart: {e}")))?;

        rows.iter()
            .map(|row| {
                Ok(ShoppingListItem {
                    name: column(row, "name")?,
                    measurement_unit: column(row, "measurement_unit")?,
                    amount: column(row, "amount")?,
                })
            })
            .collect()
    }
}
