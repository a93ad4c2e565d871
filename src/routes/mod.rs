// ABOUTME: Route module organization for the recipe REST API
// ABOUTME: Per-domain routers plus the small extraction helpers they share
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the Foodapi server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the service layer.

/// Ingredient and tag catalog routes
pub mod catalog;
/// Health check and readiness routes
pub mod health;
/// Recipe, favorite, shopping-cart, and shopping-list routes
pub mod recipes;
/// User directory and subscription routes
pub mod users;

pub use catalog::CatalogRoutes;
pub use health::HealthRoutes;
pub use recipes::RecipeRoutes;
pub use users::UserRoutes;

use axum_extra::extract::{Query, QueryRejection};
use serde::Deserialize;

use crate::errors::{AppError, AppResult};
use crate::pagination::PageParams;
use crate::resources::ServerResources;

/// `page` and `limit` query parameters
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    /// 1-based page number
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
}

impl PageQuery {
    /// Resolve against the configured page size bounds
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for page 0
    pub fn resolve(self, resources: &ServerResources) -> AppResult<PageParams> {
        let bounds = resources.config.pagination;
        PageParams::resolve(self.page, self.limit, bounds.page_size, bounds.max_page_size)
    }
}

/// Unwrap a query string extraction, turning parse failures into 400s
///
/// # Errors
///
/// Returns `InvalidInput` describing the malformed parameter
pub fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> AppResult<T> {
    query
        .map(|Query(params)| params)
        .map_err(|e| AppError::invalid_input(format!("Invalid query string: {e}")))
}

/// Parse an optional non-negative `recipes_limit`
///
/// # Errors
///
/// Returns a validation error for negative values
pub fn recipes_limit(raw: Option<i64>) -> AppResult<Option<i64>> {
    match raw {
        Some(limit) if limit < 0 => Err(AppError::validation(
            "recipes_limit",
            "recipes_limit cannot be negative",
        )),
        other => Ok(other),
    }
}
