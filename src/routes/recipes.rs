// ABOUTME: Recipe route handlers: listing, CRUD, favorites, cart, and list download
// ABOUTME: Thin axum handlers over the recipe, relation, and shopping-list services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::{Query, QueryRejection, WithRejection};
use serde::{Deserialize, Serialize};

use super::users::UserResponse;
use super::{query_params, PageQuery};
use crate::constants::shopping_list::CONTENT_TYPE;
use crate::errors::{AppError, AppResult};
use crate::models::{
    IngredientAmount, Recipe, RecipeDetails, RecipeFilter, RecipePayload, RelationKind, Tag, User,
};
use crate::pagination::{page_link, Page};
use crate::resources::ServerResources;
use crate::services::visibility::{MembershipSet, RecipeFlags};
use crate::services::{recipes, relations, shopping_list};

// ============================================================================
// Response Types
// ============================================================================

/// Full recipe representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeResponse {
    /// Recipe id
    pub id: i64,
    /// Attached tags
    pub tags: Vec<Tag>,
    /// Author profile
    pub author: UserResponse,
    /// Ingredients with amounts
    pub ingredients: Vec<IngredientAmount>,
    /// In the requester's favorites
    pub is_favorited: bool,
    /// In the requester's shopping cart
    pub is_in_shopping_cart: bool,
    /// Title
    pub name: String,
    /// Base64 data URI
    pub image: String,
    /// Description
    pub text: String,
    /// Minutes
    pub cooking_time: i64,
}

/// Short recipe form used by favorites, cart, and subscriptions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortRecipeResponse {
    /// Recipe id
    pub id: i64,
    /// Title
    pub name: String,
    /// Base64 data URI
    pub image: String,
    /// Minutes
    pub cooking_time: i64,
}

impl From<Recipe> for ShortRecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
            image: recipe.image,
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Recipe list query parameters
#[derive(Debug, Clone, Default, Deserialize)]
struct RecipeListQuery {
    page: Option<u32>,
    limit: Option<u32>,
    #[serde(default)]
    tags: Vec<String>,
    author: Option<i64>,
    is_favorited: Option<i64>,
    is_in_shopping_cart: Option<i64>,
}

impl RecipeListQuery {
    fn filter(&self) -> RecipeFilter {
        RecipeFilter {
            tags: self.tags.clone(),
            author: self.author,
            is_favorited: self.is_favorited.is_some_and(|flag| flag != 0),
            is_in_shopping_cart: self.is_in_shopping_cart.is_some_and(|flag| flag != 0),
        }
    }
}

/// Attach the requester's flags to loaded recipes
async fn render_recipes(
    resources: &ServerResources,
    requester: Option<&User>,
    details: Vec<RecipeDetails>,
) -> AppResult<Vec<RecipeResponse>> {
    let recipe_ids: Vec<i64> = details.iter().map(|d| d.recipe.id).collect();
    let author_ids: Vec<i64> = details.iter().map(|d| d.author.id).collect();

    let flags = RecipeFlags::load(resources.relations.as_ref(), requester, &recipe_ids).await?;
    let follows = MembershipSet::load(
        resources.relations.as_ref(),
        RelationKind::Follow,
        requester,
        &author_ids,
    )
    .await?;

    Ok(details
        .into_iter()
        .map(|d| {
            let id = d.recipe.id;
            let subscribed = follows.contains(d.author.id);
            RecipeResponse {
                id,
                tags: d.tags,
                author: UserResponse::new(d.author, subscribed),
                ingredients: d.ingredients,
                is_favorited: flags.is_favorited(id),
                is_in_shopping_cart: flags.is_in_shopping_cart(id),
                name: d.recipe.name,
                image: d.recipe.image,
                text: d.recipe.text,
                cooking_time: d.recipe.cooking_time,
            }
        })
        .collect())
}

async fn render_recipe(
    resources: &ServerResources,
    requester: Option<&User>,
    details: RecipeDetails,
) -> AppResult<RecipeResponse> {
    render_recipes(resources, requester, vec![details])
        .await?
        .pop()
        .ok_or_else(|| AppError::internal("Rendered recipe vanished"))
}

// ============================================================================
// Routes
// ============================================================================

/// Recipe routes implementation
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/recipes/",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/recipes/download_shopping_cart/",
                get(Self::handle_download_shopping_cart),
            )
            .route(
                "/api/recipes/:id/",
                get(Self::handle_get)
                    .patch(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .route(
                "/api/recipes/:id/favorite/",
                post(Self::handle_add_favorite).delete(Self::handle_remove_favorite),
            )
            .route(
                "/api/recipes/:id/shopping_cart/",
                post(Self::handle_add_to_cart).delete(Self::handle_remove_from_cart),
            )
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        uri: Uri,
        query: Result<Query<RecipeListQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let requester = resources
            .auth_middleware
            .authenticate_optional(&headers)
            .await?;
        let params = query_params(query)?;
        let page = PageQuery {
            page: params.page,
            limit: params.limit,
        }
        .resolve(&resources)?;

        let (details, count) =
            recipes::list_recipes(&resources.database, &params.filter(), requester.as_ref(), page)
                .await?;
        let results = render_recipes(&resources, requester.as_ref(), details).await?;
        let body = Page::new(results, count, page, |n| page_link(&uri, n));

        Ok((StatusCode::OK, Json(body)).into_response())
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        payload: Result<Json<RecipePayload>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let author = resources
            .auth_middleware
            .authenticate_required(&headers)
            .await?;
        let Json(payload) = payload?;

        let details = recipes::create_recipe(
            &resources.database,
            resources.catalog.as_ref(),
            &author,
            payload,
        )
        .await?;
        let body = render_recipe(&resources, Some(&author), details).await?;

        Ok((StatusCode::CREATED, Json(body)).into_response())
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        WithRejection(Path(recipe_id), _): WithRejection<Path<i64>, AppError>,
    ) -> Result<Response, AppError> {
        let requester = resources
            .auth_middleware
            .authenticate_optional(&headers)
            .await?;

        let details = recipes::get_recipe(&resources.database, recipe_id).await?;
        let body = render_recipe(&resources, requester.as_ref(), details).await?;

        Ok((StatusCode::OK, Json(body)).into_response())
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        WithRejection(Path(recipe_id), _): WithRejection<Path<i64>, AppError>,
        payload: Result<Json<RecipePayload>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let user = resources
            .auth_middleware
            .authenticate_required(&headers)
            .await?;
        let Json(payload) = payload?;

        let details = recipes::update_recipe(
            &resources.database,
            resources.catalog.as_ref(),
            &user,
            recipe_id,
            payload,
        )
        .await?;
        let body = render_recipe(&resources, Some(&user), details).await?;

        Ok((StatusCode::OK, Json(body)).into_response())
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        WithRejection(Path(recipe_id), _): WithRejection<Path<i64>, AppError>,
    ) -> Result<Response, AppError> {
        let user = resources
            .auth_middleware
            .authenticate_required(&headers)
            .await?;

        recipes::delete_recipe(&resources.database, &user, recipe_id).await?;
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    async fn handle_add_favorite(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        WithRejection(Path(recipe_id), _): WithRejection<Path<i64>, AppError>,
    ) -> Result<Response, AppError> {
        Self::add_recipe_relation(&resources, &headers, RelationKind::Favorite, recipe_id).await
    }

    async fn handle_remove_favorite(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        WithRejection(Path(recipe_id), _): WithRejection<Path<i64>, AppError>,
    ) -> Result<Response, AppError> {
        Self::remove_recipe_relation(&resources, &headers, RelationKind::Favorite, recipe_id).await
    }

    async fn handle_add_to_cart(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        WithRejection(Path(recipe_id), _): WithRejection<Path<i64>, AppError>,
    ) -> Result<Response, AppError> {
        Self::add_recipe_relation(&resources, &headers, RelationKind::ShoppingCart, recipe_id)
            .await
    }

    async fn handle_remove_from_cart(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        WithRejection(Path(recipe_id), _): WithRejection<Path<i64>, AppError>,
    ) -> Result<Response, AppError> {
        Self::remove_recipe_relation(&resources, &headers, RelationKind::ShoppingCart, recipe_id)
            .await
    }

    async fn add_recipe_relation(
        resources: &ServerResources,
        headers: &HeaderMap,
        kind: RelationKind,
        recipe_id: i64,
    ) -> Result<Response, AppError> {
        let user = resources
            .auth_middleware
            .authenticate_required(headers)
            .await?;

        relations::add_relation(
            &resources.database,
            resources.relations.as_ref(),
            kind,
            &user,
            recipe_id,
        )
        .await?;

        let recipe = resources
            .database
            .recipes()
            .get(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe"))?;

        Ok((StatusCode::CREATED, Json(ShortRecipeResponse::from(recipe))).into_response())
    }

    async fn remove_recipe_relation(
        resources: &ServerResources,
        headers: &HeaderMap,
        kind: RelationKind,
        recipe_id: i64,
    ) -> Result<Response, AppError> {
        let user = resources
            .auth_middleware
            .authenticate_required(headers)
            .await?;

        relations::remove_relation(
            &resources.database,
            resources.relations.as_ref(),
            kind,
            &user,
            recipe_id,
        )
        .await?;

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    async fn handle_download_shopping_cart(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = resources
            .auth_middleware
            .authenticate_required(&headers)
            .await?;

        let file = shopping_list::build_shopping_list(&resources.database, &user).await?;
        let disposition = HeaderValue::from_str(&format!(
            "attachment; filename=\"{}\"",
            file.filename
        ))
        .map_err(|e| AppError::internal(format!("Invalid attachment filename: {e}")))?;

        Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE)),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            file.content,
        )
            .into_response())
    }
}
