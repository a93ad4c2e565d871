// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Recipe composition, relation toggles, visibility flags, and shopping lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Route handlers stay thin: they authenticate, parse, call into these
//! functions, and serialize. Services that only need lookups take repository
//! trait objects so they can be unit tested without a database.

/// Reference data import used by `foodapi-cli load`
pub mod data_loader;

/// Recipe validation and transactional writes
pub mod recipes;

/// Favorite, cart, and follow toggles
pub mod relations;

/// Shopping-list aggregation and rendering
pub mod shopping_list;

/// Per-requester computed flags
pub mod visibility;
