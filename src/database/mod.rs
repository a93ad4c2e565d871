// ABOUTME: Database connection management and schema creation for the recipe backend
// ABOUTME: Wraps a SqlitePool and hands out per-domain manager structs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! `Database` owns the connection pool and creates the schema on startup.
//! Each domain has a manager wrapping a clone of the pool:
//!
//! - `UserManager`: locally mirrored user profiles
//! - `CatalogManager`: ingredient and tag reference data
//! - `RecipeManager`: recipes with their tag and ingredient-amount rows
//! - `RelationManager`: cart, favorite, and follow join rows
//! - `ShoppingManager`: ingredient rows of every recipe in a user's cart

/// Ingredient and tag reference data
pub mod catalog;
/// Row to model conversion helpers
pub mod mappers;
/// Recipe rows and their associations
pub mod recipes;
/// Cart, favorite, and follow relations
pub mod relations;
/// Repository traits used by the service layer
pub mod repositories;
/// Cart ingredient rows for shopping-list aggregation
pub mod shopping;
/// RAII transaction guard
pub mod transactions;
/// User profiles
pub mod users;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

pub use catalog::CatalogManager;
pub use recipes::RecipeManager;
pub use relations::RelationManager;
pub use shopping::ShoppingManager;
pub use transactions::{SqliteTransactionGuard, TransactionGuard};
pub use users::UserManager;

use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult};

/// Database manager for all recipe-backend storage
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database and create the schema
    ///
    /// File databases (and their parent directory) are created when missing.
    /// In-memory databases use a single long-lived connection so every query
    /// sees the same data.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or schema creation fails
    pub async fn new(url: &DatabaseUrl) -> AppResult<Self> {
        let (options, pool_options) = match url {
            DatabaseUrl::Memory => (
                SqliteConnectOptions::from_str("sqlite::memory:")
                    .map_err(|e| AppError::config(format!("Invalid database URL: {e}")))?,
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None),
            ),
            DatabaseUrl::SQLite { path } => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        AppError::config(format!(
                            "Failed to create database directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
                (
                    SqliteConnectOptions::new()
                        .filename(path)
                        .create_if_missing(true),
                    SqlitePoolOptions::new().max_connections(5),
                )
            }
        };

        let pool = pool_options
            .connect_with(options.foreign_keys(true))
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to {url}: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;

        info!("Database ready: {url}");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Begin a transaction wrapped in a rollback-on-drop guard
    ///
    /// # Errors
    ///
    /// Returns an error if a connection cannot be acquired
    pub async fn begin(&self) -> AppResult<SqliteTransactionGuard<'static>> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;
        Ok(TransactionGuard::new(tx))
    }

    /// User profile operations
    #[must_use]
    pub fn users(&self) -> UserManager {
        UserManager::new(self.pool.clone())
    }

    /// Ingredient and tag operations
    #[must_use]
    pub fn catalog(&self) -> CatalogManager {
        CatalogManager::new(self.pool.clone())
    }

    /// Recipe operations
    #[must_use]
    pub fn recipes(&self) -> RecipeManager {
        RecipeManager::new(self.pool.clone())
    }

    /// Cart, favorite, and follow operations
    #[must_use]
    pub fn relations(&self) -> RelationManager {
        RelationManager::new(self.pool.clone())
    }

    /// Shopping-list source rows
    #[must_use]
    pub fn shopping(&self) -> ShoppingManager {
        ShoppingManager::new(self.pool.clone())
    }

    /// Create all tables and indexes
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_catalog().await?;
        self.migrate_recipes().await?;
        self.migrate_relations().await?;
        debug!("Database schema is up to date");
        Ok(())
    }

    async fn execute_all(&self, statements: &[&str]) -> AppResult<()> {
        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;
        }
        Ok(())
    }

    async fn migrate_users(&self) -> AppResult<()> {
        self.execute_all(&[r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                username TEXT NOT NULL UNIQUE,
                first_name TEXT NOT NULL DEFAULT '',
                last_name TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            )
            "])
        .await
    }

    async fn migrate_catalog(&self) -> AppResult<()> {
        self.execute_all(&[
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                name_lower TEXT NOT NULL,
                measurement_unit TEXT NOT NULL,
                UNIQUE (name, measurement_unit)
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS tags (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                color TEXT NOT NULL DEFAULT '#ffffff',
                slug TEXT NOT NULL UNIQUE
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_ingredients_name ON ingredients(name COLLATE NOCASE)",
        ])
        .await
    }

    async fn migrate_recipes(&self) -> AppResult<()> {
        self.execute_all(&[
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                author_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                image TEXT NOT NULL,
                text TEXT NOT NULL,
                cooking_time INTEGER NOT NULL CHECK (cooking_time >= 1),
                created_at TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                ingredient_id INTEGER NOT NULL REFERENCES ingredients(id) ON DELETE CASCADE,
                amount INTEGER NOT NULL CHECK (amount >= 1),
                UNIQUE (ingredient_id, recipe_id)
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS recipe_tags (
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
                PRIMARY KEY (recipe_id, tag_id)
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_recipes_author ON recipes(author_id)",
            "CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_recipe ON recipe_ingredients(recipe_id)",
            "CREATE INDEX IF NOT EXISTS idx_recipe_tags_tag ON recipe_tags(tag_id)",
        ])
        .await
    }

    async fn migrate_relations(&self) -> AppResult<()> {
        self.execute_all(&[
            r"
            CREATE TABLE IF NOT EXISTS favorites (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                UNIQUE (user_id, recipe_id)
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS shopping_carts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                UNIQUE (user_id, recipe_id)
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS follows (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                author_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                UNIQUE (user_id, author_id),
                CHECK (user_id <> author_id)
            )
            ",
        ])
        .await
    }
}
