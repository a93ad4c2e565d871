// ABOUTME: Per-requester computed flags: is_favorited, is_in_shopping_cart, is_subscribed
// ABOUTME: One membership query per relation per response, never one per object
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;

use crate::database::repositories::RelationRepository;
use crate::errors::AppResult;
use crate::models::{RelationKind, User};

/// Which of a batch of targets the requester is related to
#[derive(Debug, Clone, Default)]
pub struct MembershipSet {
    members: HashSet<i64>,
}

impl MembershipSet {
    /// Load memberships of `requester` among `target_ids`
    ///
    /// Anonymous requesters are related to nothing and cost no query.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails
    pub async fn load(
        relations: &dyn RelationRepository,
        kind: RelationKind,
        requester: Option<&User>,
        target_ids: &[i64],
    ) -> AppResult<Self> {
        let members = match requester {
            Some(user) if !target_ids.is_empty() => {
                relations.targets_among(kind, user.id, target_ids).await?
            }
            _ => HashSet::new(),
        };
        Ok(Self { members })
    }

    /// Whether `target_id` is a member
    #[must_use]
    pub fn contains(&self, target_id: i64) -> bool {
        self.members.contains(&target_id)
    }
}

/// Favorite and cart flags for a batch of recipes
#[derive(Debug, Clone, Default)]
pub struct RecipeFlags {
    favorites: MembershipSet,
    cart: MembershipSet,
}

impl RecipeFlags {
    /// Load both flags for `recipe_ids`
    ///
    /// # Errors
    ///
    /// Returns an error if a lookup fails
    pub async fn load(
        relations: &dyn RelationRepository,
        requester: Option<&User>,
        recipe_ids: &[i64],
    ) -> AppResult<Self> {
        Ok(Self {
            favorites: MembershipSet::load(relations, RelationKind::Favorite, requester, recipe_ids)
                .await?,
            cart: MembershipSet::load(relations, RelationKind::ShoppingCart, requester, recipe_ids)
                .await?,
        })
    }

    /// `is_favorited` for one recipe
    #[must_use]
    pub fn is_favorited(&self, recipe_id: i64) -> bool {
        self.favorites.contains(recipe_id)
    }

    /// `is_in_shopping_cart` for one recipe
    #[must_use]
    pub fn is_in_shopping_cart(&self, recipe_id: i64) -> bool {
        self.cart.contains(recipe_id)
    }
}
