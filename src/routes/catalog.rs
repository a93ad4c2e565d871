// ABOUTME: Read-only ingredient and tag route handlers
// ABOUTME: Unpaginated lists with a case-insensitive ingredient name prefix filter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::{Query, QueryRejection, WithRejection};
use serde::Deserialize;

use super::query_params;
use crate::errors::AppError;
use crate::resources::ServerResources;

/// Ingredient list query parameters
#[derive(Debug, Clone, Default, Deserialize)]
struct IngredientQuery {
    name: Option<String>,
}

/// Catalog routes implementation
pub struct CatalogRoutes;

impl CatalogRoutes {
    /// Create all ingredient and tag routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/ingredients/", get(Self::handle_list_ingredients))
            .route("/api/ingredients/:id/", get(Self::handle_get_ingredient))
            .route("/api/tags/", get(Self::handle_list_tags))
            .route("/api/tags/:id/", get(Self::handle_get_tag))
            .with_state(resources)
    }

    async fn handle_list_ingredients(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        query: Result<Query<IngredientQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        resources
            .auth_middleware
            .authenticate_optional(&headers)
            .await?;
        let params = query_params(query)?;

        let ingredients = resources
            .database
            .catalog()
            .list_ingredients(params.name.as_deref())
            .await?;

        Ok((StatusCode::OK, Json(ingredients)).into_response())
    }

    async fn handle_get_ingredient(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    ) -> Result<Response, AppError> {
        resources
            .auth_middleware
            .authenticate_optional(&headers)
            .await?;

        let ingredient = resources
            .database
            .catalog()
            .get_ingredient(id)
            .await?
            .ok_or_else(|| AppError::not_found("Ingredient"))?;

        Ok((StatusCode::OK, Json(ingredient)).into_response())
    }

    async fn handle_list_tags(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        resources
            .auth_middleware
            .authenticate_optional(&headers)
            .await?;

        let tags = resources.database.catalog().list_tags().await?;
        Ok((StatusCode::OK, Json(tags)).into_response())
    }

    async fn handle_get_tag(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    ) -> Result<Response, AppError> {
        resources
            .auth_middleware
            .authenticate_optional(&headers)
            .await?;

        let tag = resources
            .database
            .catalog()
            .get_tag(id)
            .await?
            .ok_or_else(|| AppError::not_found("Tag"))?;

        Ok((StatusCode::OK, Json(tag)).into_response())
    }
}
