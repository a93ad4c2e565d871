// ABOUTME: User directory and author subscription route handlers
// ABOUTME: Lists users, resolves /me, and toggles follows with recipe previews
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::{Query, QueryRejection, WithRejection};
use serde::{Deserialize, Serialize};

use super::recipes::ShortRecipeResponse;
use super::{query_params, recipes_limit, PageQuery};
use crate::errors::{AppError, AppResult};
use crate::models::{RelationKind, User};
use crate::pagination::{page_link, Page};
use crate::resources::ServerResources;
use crate::services::relations;
use crate::services::visibility::MembershipSet;

// ============================================================================
// Response Types
// ============================================================================

/// Public user profile with the requester's follow flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// Email address
    pub email: String,
    /// User id
    pub id: i64,
    /// Login name
    pub username: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Whether the requester follows this user
    pub is_subscribed: bool,
}

impl UserResponse {
    /// Build from a user and a precomputed follow flag
    #[must_use]
    pub fn new(user: User, is_subscribed: bool) -> Self {
        Self {
            email: user.email,
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            is_subscribed,
        }
    }
}

/// A followed author with a preview of their recipes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    /// Author profile
    #[serde(flatten)]
    pub author: UserResponse,
    /// The author's recipes, at most `recipes_limit`
    pub recipes: Vec<ShortRecipeResponse>,
    /// Total number of the author's recipes
    pub recipes_count: i64,
}

/// Query parameters of subscription endpoints
#[derive(Debug, Clone, Copy, Default, Deserialize)]
struct SubscriptionQuery {
    page: Option<u32>,
    limit: Option<u32>,
    recipes_limit: Option<i64>,
}

// ============================================================================
// Routes
// ============================================================================

/// User routes implementation
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/users/", get(Self::handle_list))
            .route("/api/users/me/", get(Self::handle_me))
            .route("/api/users/subscriptions/", get(Self::handle_subscriptions))
            .route("/api/users/:id/", get(Self::handle_retrieve))
            .route(
                "/api/users/:id/subscribe/",
                post(Self::handle_subscribe).delete(Self::handle_unsubscribe),
            )
            .with_state(resources)
    }

    /// Build the subscription view of one author
    ///
    /// # Errors
    ///
    /// Returns an error if the author's recipes cannot be loaded
    pub async fn subscription_response(
        resources: &ServerResources,
        author: User,
        recipes_limit: Option<i64>,
    ) -> AppResult<SubscriptionResponse> {
        let recipes = resources.database.recipes();
        let preview = recipes.by_author(author.id, recipes_limit).await?;
        let recipes_count = recipes.count_by_author(author.id).await?;

        Ok(SubscriptionResponse {
            author: UserResponse::new(author, true),
            recipes: preview.into_iter().map(ShortRecipeResponse::from).collect(),
            recipes_count,
        })
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        uri: Uri,
        query: Result<Query<PageQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let requester = resources
            .auth_middleware
            .authenticate_optional(&headers)
            .await?;
        let page = query_params(query)?.resolve(&resources)?;

        let users = resources.database.users();
        let count = users.count().await?;
        page.ensure_in_range(count)?;
        let rows = users.list(page.sql_limit(), page.offset()).await?;

        let ids: Vec<i64> = rows.iter().map(|user| user.id).collect();
        let follows = MembershipSet::load(
            resources.relations.as_ref(),
            RelationKind::Follow,
            requester.as_ref(),
            &ids,
        )
        .await?;

        let results = rows
            .into_iter()
            .map(|user| {
                let subscribed = follows.contains(user.id);
                UserResponse::new(user, subscribed)
            })
            .collect();
        let body = Page::new(results, count, page, |n| page_link(&uri, n));

        Ok((StatusCode::OK, Json(body)).into_response())
    }

    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = resources
            .auth_middleware
            .authenticate_required(&headers)
            .await?;

        Ok((StatusCode::OK, Json(UserResponse::new(user, false))).into_response())
    }

    async fn handle_retrieve(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        WithRejection(Path(user_id), _): WithRejection<Path<i64>, AppError>,
    ) -> Result<Response, AppError> {
        let requester = resources
            .auth_middleware
            .authenticate_optional(&headers)
            .await?;

        let user = resources
            .database
            .users()
            .get(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        let follows = MembershipSet::load(
            resources.relations.as_ref(),
            RelationKind::Follow,
            requester.as_ref(),
            &[user.id],
        )
        .await?;
        let subscribed = follows.contains(user.id);

        Ok((StatusCode::OK, Json(UserResponse::new(user, subscribed))).into_response())
    }

    async fn handle_subscriptions(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        uri: Uri,
        query: Result<Query<SubscriptionQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let user = resources
            .auth_middleware
            .authenticate_required(&headers)
            .await?;
        let params = query_params(query)?;
        let limit = recipes_limit(params.recipes_limit)?;
        let page = PageQuery {
            page: params.page,
            limit: params.limit,
        }
        .resolve(&resources)?;

        let (authors, count) = resources
            .database
            .relations()
            .followed_authors(user.id, page)
            .await?;
        page.ensure_in_range(count)?;

        let mut results = Vec::with_capacity(authors.len());
        for author in authors {
            results.push(Self::subscription_response(&resources, author, limit).await?);
        }
        let body = Page::new(results, count, page, |n| page_link(&uri, n));

        Ok((StatusCode::OK, Json(body)).into_response())
    }

    async fn handle_subscribe(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        WithRejection(Path(author_id), _): WithRejection<Path<i64>, AppError>,
        query: Result<Query<SubscriptionQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let user = resources
            .auth_middleware
            .authenticate_required(&headers)
            .await?;
        let limit = recipes_limit(query_params(query)?.recipes_limit)?;

        relations::add_relation(
            &resources.database,
            resources.relations.as_ref(),
            RelationKind::Follow,
            &user,
            author_id,
        )
        .await?;

        let author = resources
            .database
            .users()
            .get(author_id)
            .await?
            .ok_or_else(|| AppError::not_found("Author"))?;
        let body = Self::subscription_response(&resources, author, limit).await?;

        Ok((StatusCode::CREATED, Json(body)).into_response())
    }

    async fn handle_unsubscribe(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        WithRejection(Path(author_id), _): WithRejection<Path<i64>, AppError>,
    ) -> Result<Response, AppError> {
        let user = resources
            .auth_middleware
            .authenticate_required(&headers)
            .await?;

        relations::remove_relation(
            &resources.database,
            resources.relations.as_ref(),
            RelationKind::Follow,
            &user,
            author_id,
        )
        .await?;

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
