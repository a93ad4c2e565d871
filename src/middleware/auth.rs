// ABOUTME: Bearer token authentication for the REST handlers
// ABOUTME: Resolves the Authorization header to a locally known user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, HeaderMap};
use tracing::{debug, warn, Span};

use crate::auth::AuthManager;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::User;

/// Authenticates requests carrying `Authorization: Bearer <JWT>`
#[derive(Clone)]
pub struct AuthMiddleware {
    auth_manager: Arc<AuthManager>,
    database: Arc<Database>,
}

impl AuthMiddleware {
    /// Create new auth middleware
    #[must_use]
    pub const fn new(auth_manager: Arc<AuthManager>, database: Arc<Database>) -> Self {
        Self {
            auth_manager,
            database,
        }
    }

    /// Authenticate when credentials are present
    ///
    /// A missing header yields `None`. A present but bad header is an error
    /// even on public routes.
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` or `AuthExpired` for unusable credentials
    pub async fn authenticate_optional(&self, headers: &HeaderMap) -> AppResult<Option<User>> {
        match Self::authorization_header(headers)? {
            Some(header) => self.authenticate_request(header).await.map(Some),
            None => Ok(None),
        }
    }

    /// Authenticate a request that must carry credentials
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without credentials, otherwise as
    /// [`Self::authenticate_request`]
    pub async fn authenticate_required(&self, headers: &HeaderMap) -> AppResult<User> {
        match Self::authorization_header(headers)? {
            Some(header) => self.authenticate_request(header).await,
            None => {
                debug!("Rejecting anonymous request to a protected route");
                Err(AppError::auth_required())
            }
        }
    }

    /// Authenticate an `Authorization` header value
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The header is not `Bearer <token>`
    /// - The token is invalid or expired
    /// - The token's user does not exist locally
    #[tracing::instrument(skip(self, auth_header), fields(user_id = tracing::field::Empty))]
    pub async fn authenticate_request(&self, auth_header: &str) -> AppResult<User> {
        let Some(token) = auth_header.strip_prefix("Bearer ") else {
            warn!("Authentication failed: expected 'Bearer <token>'");
            return Err(AppError::auth_invalid(
                "Invalid authorization header format - must be 'Bearer <token>'",
            ));
        };

        let claims = self.auth_manager.validate_token(token.trim())?;
        let user_id = claims.user_id()?;

        let user = self
            .database
            .users()
            .get(user_id)
            .await?
            .ok_or_else(|| AppError::auth_invalid("Token subject is not a known user"))?;

        Span::current().record("user_id", user.id);
        debug!("JWT authentication successful for user: {}", user.id);
        Ok(user)
    }

    fn authorization_header(headers: &HeaderMap) -> AppResult<Option<&str>> {
        headers
            .get(AUTHORIZATION)
            .map(|value| {
                value
                    .to_str()
                    .map_err(|_| AppError::auth_invalid("Authorization header is not valid text"))
            })
            .transpose()
    }

    /// Get reference to the auth manager
    #[must_use]
    pub fn auth_manager(&self) -> &AuthManager {
        &self.auth_manager
    }
}
