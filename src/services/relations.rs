// ABOUTME: Add/remove toggles for favorites, shopping cart, and follows
// ABOUTME: One implementation parameterized by RelationKind with uniform error semantics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use tracing::{debug, info};

use crate::database::repositories::RelationRepository;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{RelationKind, User};

/// Check that the relation target exists
///
/// # Errors
///
/// Returns `ResourceNotFound` naming the recipe or author
pub async fn ensure_target_exists(db: &Database, kind: RelationKind, target_id: i64) -> AppResult<()> {
    let exists = if kind.targets_user() {
        db.users().get(target_id).await?.is_some()
    } else {
        db.recipes().get(target_id).await?.is_some()
    };

    if exists {
        Ok(())
    } else {
        Err(AppError::not_found(kind.target_name()))
    }
}

fn reject_self_follow(kind: RelationKind, user_id: i64, target_id: i64, adding: bool) -> AppResult<()> {
    if kind.targets_user() && user_id == target_id {
        let message = if adding {
            "Cannot subscribe to yourself"
        } else {
            "Cannot unsubscribe from yourself"
        };
        return Err(AppError::invalid_input(message));
    }
    Ok(())
}

/// Store the (user, target) pair
///
/// A uniqueness violation from a concurrent insert is reported like an
/// existing pair.
///
/// # Errors
///
/// Returns `InvalidInput` for self-follow or an existing pair
pub async fn add(
    relations: &dyn RelationRepository,
    kind: RelationKind,
    user_id: i64,
    target_id: i64,
) -> AppResult<()> {
    reject_self_follow(kind, user_id, target_id, true)?;

    if relations.exists(kind, user_id, target_id).await? {
        return Err(AppError::invalid_input(kind.already_added_message()));
    }

    match relations.insert(kind, user_id, target_id).await {
        Ok(()) => {
            info!(?kind, user_id, target_id, "Relation added");
            Ok(())
        }
        Err(e) if e.is_already_exists() => {
            debug!(?kind, user_id, target_id, "Relation insert lost a race");
            Err(AppError::invalid_input(kind.already_added_message()))
        }
        Err(e) => Err(e),
    }
}

/// Delete the (user, target) pair
///
/// # Errors
///
/// Returns `InvalidInput` for self-unfollow or a missing pair
pub async fn remove(
    relations: &dyn RelationRepository,
    kind: RelationKind,
    user_id: i64,
    target_id: i64,
) -> AppResult<()> {
    reject_self_follow(kind, user_id, target_id, false)?;

    if relations.delete(kind, user_id, target_id).await? {
        info!(?kind, user_id, target_id, "Relation removed");
        Ok(())
    } else {
        Err(AppError::invalid_input(kind.not_found_message()))
    }
}

/// Existence check followed by [`add`]
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown target, otherwise as [`add`]
pub async fn add_relation(
    db: &Database,
    relations: &dyn RelationRepository,
    kind: RelationKind,
    user: &User,
    target_id: i64,
) -> AppResult<()> {
    ensure_target_exists(db, kind, target_id).await?;
    add(relations, kind, user.id, target_id).await
}

/// Existence check followed by [`remove`]
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown target, otherwise as [`remove`]
pub async fn remove_relation(
    db: &Database,
    relations: &dyn RelationRepository,
    kind: RelationKind,
    user: &User,
    target_id: i64,
) -> AppResult<()> {
    ensure_target_exists(db, kind, target_id).await?;
    remove(relations, kind, user.id, target_id).await
}
