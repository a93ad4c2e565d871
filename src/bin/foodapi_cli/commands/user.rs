// ABOUTME: User commands for foodapi-cli
// ABOUTME: Mirrors an identity-provider profile into the local users table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use foodapi_server::{
    database::Database,
    errors::{AppError, AppResult},
    models::NewUser,
};
use tracing::info;

/// Create a local user profile
pub async fn create(
    database: &Database,
    email: String,
    username: String,
    first_name: String,
    last_name: String,
) -> AppResult<()> {
    if email.trim().is_empty() || username.trim().is_empty() {
        return Err(AppError::invalid_input("Email and username are required"));
    }

    let user = database
        .users()
        .create(&NewUser {
            email,
            username,
            first_name,
            last_name,
        })
        .await?;

    info!("Created user {} ({})", user.username, user.id);
    println!("User created: id={} username={} email={}", user.id, user.username, user.email);
    Ok(())
}
