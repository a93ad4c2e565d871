// ABOUTME: The user-owned join relations: shopping cart, favorites, and follows
// ABOUTME: One RelationKind parameterizes table, target column, and client messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// A (user, target) relation toggled through add/remove endpoints
///
/// `Favorite` and `ShoppingCart` target recipes; `Follow` targets another
/// user (the followed author).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// Recipe marked as favorite
    Favorite,
    /// Recipe placed in the shopping cart
    ShoppingCart,
    /// Author followed by the user
    Follow,
}

impl RelationKind {
    /// Join table holding the relation rows
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Favorite => "favorites",
            Self::ShoppingCart => "shopping_carts",
            Self::Follow => "follows",
        }
    }

    /// Column referencing the relation target
    #[must_use]
    pub const fn target_column(self) -> &'static str {
        match self {
            Self::Favorite | Self::ShoppingCart => "recipe_id",
            Self::Follow => "author_id",
        }
    }

    /// Whether the target is a user rather than a recipe
    #[must_use]
    pub const fn targets_user(self) -> bool {
        matches!(self, Self::Follow)
    }

    /// Name of the target used in not-found messages
    #[must_use]
    pub const fn target_name(self) -> &'static str {
        if self.targets_user() {
            "Author"
        } else {
            "Recipe"
        }
    }

    /// Message returned when adding a pair that already exists
    #[must_use]
    pub const fn already_added_message(self) -> &'static str {
        match self {
            Self::Favorite => "Recipe already added to favorites",
            Self::ShoppingCart => "Recipe already added to shopping cart",
            Self::Follow => "Already subscribed to this author",
        }
    }

    /// Message returned when removing a pair that does not exist
    #[must_use]
    pub const fn not_found_message(self) -> &'static str {
        match self {
            Self::Favorite => "Recipe not found in favorites",
            Self::ShoppingCart => "Recipe not found in shopping cart",
            Self::Follow => "Not subscribed to this author",
        }
    }
}
