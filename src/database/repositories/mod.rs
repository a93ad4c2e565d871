// ABOUTME: Repository traits that decouple services from the concrete SQLite managers
// ABOUTME: Services take these as trait objects so unit tests can supply fakes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Repository Pattern
//!
//! Each trait covers one focused concern. The `*RepositoryImpl` types delegate
//! to the managers handed out by [`Database`](crate::database::Database).

/// Catalog repository implementation
pub mod catalog_repository;
/// Relation repository implementation
pub mod relation_repository;

use std::collections::HashSet;

use async_trait::async_trait;

pub use catalog_repository::CatalogRepositoryImpl;
pub use relation_repository::RelationRepositoryImpl;

use crate::errors::AppResult;
use crate::models::{Ingredient, NewIngredient, NewTag, RelationKind, Tag};

/// Ingredient and tag reference data
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Insert an ingredient; `ResourceAlreadyExists` on a duplicate
    async fn create_ingredient(&self, ingredient: &NewIngredient) -> AppResult<Ingredient>;

    /// Insert a tag; `ResourceAlreadyExists` on a duplicate slug
    async fn create_tag(&self, tag: &NewTag) -> AppResult<Tag>;

    /// Ids with no matching ingredient
    async fn missing_ingredient_ids(&self, ids: &[i64]) -> AppResult<Vec<i64>>;

    /// Ids with no matching tag
    async fn missing_tag_ids(&self, ids: &[i64]) -> AppResult<Vec<i64>>;
}

/// Favorite, shopping-cart, and follow pairs
#[async_trait]
pub trait RelationRepository: Send + Sync {
    /// Insert a pair; `ResourceAlreadyExists` if present
    async fn insert(&self, kind: RelationKind, user_id: i64, target_id: i64) -> AppResult<()>;

    /// Delete a pair, returning whether it existed
    async fn delete(&self, kind: RelationKind, user_id: i64, target_id: i64) -> AppResult<bool>;

    /// Whether a pair exists
    async fn exists(&self, kind: RelationKind, user_id: i64, target_id: i64) -> AppResult<bool>;

    /// The subset of `target_ids` related to `user_id`
    async fn targets_among(
        &self,
        kind: RelationKind,
        user_id: i64,
        target_ids: &[i64],
    ) -> AppResult<HashSet<i64>>;
}
