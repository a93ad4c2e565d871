// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory database resources, user, token, and catalog helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `foodapi_server`
//!
//! Every helper builds on a fresh in-memory database so tests never share
//! state.

use std::sync::{Arc, Once};

use anyhow::Result;
use axum::Router;
use foodapi_server::{
    auth::AuthManager,
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    models::{Ingredient, NewIngredient, NewTag, NewUser, Tag, User},
    resources::ServerResources,
    server::build_router,
};

static INIT_LOGGER: Once = Once::new();

/// Secret shared by the test auth manager and hand-built tokens
pub const TEST_JWT_SECRET: &[u8] = b"foodapi-test-secret";

/// One-pixel PNG as a data URI
pub const TEST_IMAGE: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Configuration pointing at an in-memory database
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.database.url = DatabaseUrl::Memory;
    config
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new(&DatabaseUrl::Memory).await?)
}

/// Create test authentication manager
pub fn create_test_auth_manager() -> AuthManager {
    AuthManager::new(TEST_JWT_SECRET, 24)
}

/// Full server resources over a fresh in-memory database
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    Ok(Arc::new(ServerResources::new(
        database,
        create_test_auth_manager(),
        Arc::new(test_config()),
    )))
}

/// The complete application router
pub fn test_app(resources: &Arc<ServerResources>) -> Router {
    build_router(Arc::clone(resources))
}

/// Create a user with a username-derived email
pub async fn create_test_user(database: &Database, username: &str) -> Result<User> {
    let user = database
        .users()
        .create(&NewUser {
            email: format!("{username}@example.com"),
            username: username.to_owned(),
            first_name: "Test".to_owned(),
            last_name: username.to_owned(),
        })
        .await?;
    Ok(user)
}

/// `Authorization` header value for `user`
pub fn bearer(resources: &ServerResources, user: &User) -> String {
    let token = resources
        .auth_manager
        .generate_token(user)
        .expect("token generation");
    format!("Bearer {token}")
}

/// Create a user and return it with its bearer header
pub async fn create_authenticated_user(
    resources: &ServerResources,
    username: &str,
) -> Result<(User, String)> {
    let user = create_test_user(&resources.database, username).await?;
    let auth = bearer(resources, &user);
    Ok((user, auth))
}

/// Insert an ingredient
pub async fn create_ingredient(database: &Database, name: &str, unit: &str) -> Result<Ingredient> {
    Ok(database
        .catalog()
        .create_ingredient(&NewIngredient {
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
        })
        .await?)
}

/// Insert a tag whose slug equals its name
pub async fn create_tag(database: &Database, slug: &str) -> Result<Tag> {
    Ok(database
        .catalog()
        .create_tag(&NewTag {
            name: slug.to_owned(),
            color: "#E26C2D".to_owned(),
            slug: slug.to_owned(),
        })
        .await?)
}

/// JSON body for creating a recipe
pub fn recipe_payload(
    name: &str,
    ingredients: &[(i64, i64)],
    tags: &[i64],
) -> serde_json::Value {
    let ingredients: Vec<serde_json::Value> = ingredients
        .iter()
        .map(|(id, amount)| serde_json::json!({"id": id, "amount": amount}))
        .collect();

    serde_json::json!({
        "name": name,
        "image": TEST_IMAGE,
        "text": format!("How to make {name}"),
        "cooking_time": 30,
        "ingredients": ingredients,
        "tags": tags,
    })
}
