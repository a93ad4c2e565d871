// ABOUTME: Local mirror of identity-provider user profiles
// ABOUTME: Users author recipes and own cart, favorite, and follow relations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User id, also the `sub` claim of issued tokens
    pub id: i64,
    /// Unique email address
    pub email: String,
    /// Unique login name
    pub username: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// When the profile was mirrored locally
    pub created_at: DateTime<Utc>,
}

/// Profile data for provisioning a user
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    /// Unique email address
    pub email: String,
    /// Unique login name
    pub username: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
}
