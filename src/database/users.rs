// ABOUTME: User profile storage for locally mirrored identity-provider accounts
// ABOUTME: Creation with uniqueness checks, lookup by id or username, and paging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::mappers::parse_user;
use crate::errors::{AppError, AppResult};
use crate::models::{NewUser, User};

const USER_COLUMNS: &str = "id, email, username, first_name, last_name, created_at";

/// User profile database operations
pub struct UserManager {
    pool: SqlitePool,
}

impl UserManager {
    /// Create a new user manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a user profile
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` when the email or username is taken
    pub async fn create(&self, user: &NewUser) -> AppResult<User> {
        let created_at = Utc::now();
        let result = sqlx::query(
            r"
            INSERT INTO users (email, username, first_name, last_name, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

        self.get(result.last_insert_rowid())
            .await?
            .ok_or_else(|| AppError::internal("Inserted user could not be read back"))
    }

    /// Get a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get(&self, id: i64) -> AppResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.as_ref().map(parse_user).transpose()
    }

    /// Get a user by username
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user by username: {e}")))?;

        row.as_ref().map(parse_user).transpose()
    }

    /// Get users by id, ordered by id; unknown ids are skipped
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_many(&self, ids: &[i64]) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {USER_COLUMNS} FROM users WHERE id IN ("));
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY id");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get users: {e}")))?;

        rows.iter().map(parse_user).collect()
    }

    /// List one page of users ordered by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list users: {e}")))?;

        rows.iter().map(parse_user).collect()
    }

    /// Total number of users
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count users: {e}")))
    }
}
