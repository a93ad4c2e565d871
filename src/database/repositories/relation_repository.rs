// ABOUTME: Relation repository implementation backed by the SQLite relation manager
// ABOUTME: Serves relation toggles and per-request membership lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;

use async_trait::async_trait;

use super::RelationRepository;
use crate::database::Database;
use crate::errors::AppResult;
use crate::models::RelationKind;

/// `SQLite` implementation of `RelationRepository`
pub struct RelationRepositoryImpl {
    db: Database,
}

impl RelationRepositoryImpl {
    /// Create a new `RelationRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RelationRepository for RelationRepositoryImpl {
    async fn insert(&self, kind: RelationKind, user_id: i64, target_id: i64) -> AppResult<()> {
        self.db.relations().insert(kind, user_id, target_id).await
    }

    async fn delete(&self, kind: RelationKind, user_id: i64, target_id: i64) -> AppResult<bool> {
        self.db.relations().delete(kind, user_id, target_id).await
    }

    async fn exists(&self, kind: RelationKind, user_id: i64, target_id: i64) -> AppResult<bool> {
        self.db.relations().exists(kind, user_id, target_id).await
    }

    async fn targets_among(
        &self,
        kind: RelationKind,
        user_id: i64,
        target_ids: &[i64],
    ) -> AppResult<HashSet<i64>> {
        self.db
            .relations()
            .targets_among(kind, user_id, target_ids)
            .await
    }
}
