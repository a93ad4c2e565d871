// ABOUTME: Storage for the user-owned join relations: favorites, cart, and follows
// ABOUTME: One manager parameterized by RelationKind instead of a table per feature
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::mappers::parse_user;
use crate::errors::{AppError, AppResult};
use crate::models::{RelationKind, User};
use crate::pagination::PageParams;

/// Favorite, shopping-cart, and follow database operations
pub struct RelationManager {
    pool: SqlitePool,
}

impl RelationManager {
    /// Create a new relation manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a (user, target) pair
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the pair is already stored
    pub async fn insert(&self, kind: RelationKind, user_id: i64, target_id: i64) -> AppResult<()> {
        sqlx::query(&format!(
            "INSERT INTO {} (user_id, {}) VALUES ($1, $2)",
            kind.table(),
            kind.target_column()
        ))
        .bind(user_id)
        .bind(target_id)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(())
    }

    /// Delete a (user, target) pair, returning whether it existed
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn delete(&self, kind: RelationKind, user_id: i64, target_id: i64) -> AppResult<bool> {
        let result = sqlx::query(&format!(
            "DELETE FROM {} WHERE user_id = $1 AND {} = $2",
            kind.table(),
            kind.target_column()
        ))
        .bind(user_id)
        .bind(target_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete from {}: {e}", kind.table())))?;

        Ok(result.rows_affected() > 0)
    }

    /// Whether the (user, target) pair exists
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn exists(&self, kind: RelationKind, user_id: i64, target_id: i64) -> AppResult<bool> {
        sqlx::query_scalar(&format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE user_id = $1 AND {} = $2)",
            kind.table(),
            kind.target_column()
        ))
        .bind(user_id)
        .bind(target_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to query {}: {e}", kind.table())))
    }

    /// The subset of `target_ids` the user is related to
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn targets_among(
        &self,
        kind: RelationKind,
        user_id: i64,
        target_ids: &[i64],
    ) -> AppResult<HashSet<i64>> {
        if target_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let column = kind.target_column();
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {column} FROM {} WHERE user_id = ",
            kind.table()
        ));
        query.push_bind(user_id).push(format!(" AND {column} IN ("));
        let mut separated = query.separated(", ");
        for id in target_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let found = query
            .build_query_scalar::<i64>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to query {}: {e}", kind.table())))?;

        Ok(found.into_iter().collect())
    }

    /// One page of the authors `user_id` follows, ordered by author id
    ///
    /// Returns the page and the total number of followed authors.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn followed_authors(
        &self,
        user_id: i64,
        page: PageParams,
    ) -> AppResult<(Vec<User>, i64)> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count subscriptions: {e}")))?;

        let rows = sqlx::query(
            r"
            SELECT u.id, u.email, u.username, u.first_name, u.last_name, u.created_at
            FROM follows f
            JOIN users u ON u.id = f.author_id
            WHERE f.user_id = $1
            ORDER BY u.id
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(user_id)
        .bind(page.sql_limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list subscriptions: {e}")))?;

        let authors = rows.iter().map(parse_user).collect::<AppResult<Vec<_>>>()?;
        Ok((authors, count))
    }
}
