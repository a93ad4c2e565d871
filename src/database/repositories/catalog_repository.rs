// ABOUTME: Catalog repository implementation backed by the SQLite catalog manager
// ABOUTME: Used by recipe validation and the reference data loader
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;

use super::CatalogRepository;
use crate::database::Database;
use crate::errors::AppResult;
use crate::models::{Ingredient, NewIngredient, NewTag, Tag};

/// `SQLite` implementation of `CatalogRepository`
pub struct CatalogRepositoryImpl {
    db: Database,
}

impl CatalogRepositoryImpl {
    /// Create a new `CatalogRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogRepository for CatalogRepositoryImpl {
    async fn create_ingredient(&self, ingredient: &NewIngredient) -> AppResult<Ingredient> {
        self.db.catalog().create_ingredient(ingredient).await
    }

    async fn create_tag(&self, tag: &NewTag) -> AppResult<Tag> {
        self.db.catalog().create_tag(tag).await
    }

    async fn missing_ingredient_ids(&self, ids: &[i64]) -> AppResult<Vec<i64>> {
        self.db.catalog().missing_ingredient_ids(ids).await
    }

    async fn missing_tag_ids(&self, ids: &[i64]) -> AppResult<Vec<i64>> {
        self.db.catalog().missing_tag_ids(ids).await
    }
}
