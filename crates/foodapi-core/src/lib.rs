// ABOUTME: Core types and constants for the Foodapi recipe-sharing backend
// ABOUTME: Foundation crate with error handling, pagination, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Foodapi Core
//!
//! Foundation crate providing shared types and constants for the recipe-sharing
//! backend. This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Limits and defaults organized by domain
//! - **pagination**: Page-number pagination with a client-adjustable limit
//! - **models**: Catalog, recipe, relation, and user domain types

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Page-number pagination types
pub mod pagination;

/// Core data models (Ingredient, Tag, Recipe, User, relations)
pub mod models;
