// ABOUTME: Development token command for foodapi-cli
// ABOUTME: Signs a bearer token for an existing user with the configured secret
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use foodapi_server::{
    auth::AuthManager,
    config::ServerConfig,
    database::Database,
    errors::{AppError, AppResult},
};
use tracing::info;

/// Issue a token for `username`
pub async fn issue(database: &Database, config: &ServerConfig, username: &str) -> AppResult<()> {
    let user = database
        .users()
        .get_by_username(username)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User '{username}'")))?;

    let auth_manager = AuthManager::new(
        config.auth.jwt_secret.as_bytes(),
        config.auth.token_expiry_hours,
    );
    let token = auth_manager.generate_token(&user)?;

    info!(
        "Issued token for user {} valid for {} hours",
        user.id, config.auth.token_expiry_hours
    );
    println!("{token}");
    println!();
    println!("Use it in the Authorization header: Bearer <token>");
    Ok(())
}
