// ABOUTME: Shared server state handed to every axum router
// ABOUTME: Wires database, auth, repositories, and configuration once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::repositories::{
    CatalogRepository, CatalogRepositoryImpl, RelationRepository, RelationRepositoryImpl,
};
use crate::database::Database;
use crate::middleware::AuthMiddleware;

/// Centralized resource container for dependency injection
///
/// Everything is created once and shared through `Arc`, so cloning the
/// container per router is cheap.
#[derive(Clone)]
pub struct ServerResources {
    /// Storage
    pub database: Arc<Database>,
    /// Token verification
    pub auth_manager: Arc<AuthManager>,
    /// Header-to-user resolution
    pub auth_middleware: Arc<AuthMiddleware>,
    /// Ingredient and tag lookups for services
    pub catalog: Arc<dyn CatalogRepository>,
    /// Favorite, cart, and follow pairs for services
    pub relations: Arc<dyn RelationRepository>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create server resources with proper Arc sharing
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager, config: Arc<ServerConfig>) -> Self {
        let database = Arc::new(database);
        let auth_manager = Arc::new(auth_manager);
        let auth_middleware = Arc::new(AuthMiddleware::new(
            Arc::clone(&auth_manager),
            Arc::clone(&database),
        ));

        Self {
            catalog: Arc::new(CatalogRepositoryImpl::new((*database).clone())),
            relations: Arc::new(RelationRepositoryImpl::new((*database).clone())),
            database,
            auth_manager,
            auth_middleware,
            config,
        }
    }

    /// Build resources from configuration: connect, migrate, and set up auth
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened
    pub async fn from_config(config: ServerConfig) -> crate::errors::AppResult<Self> {
        let database = Database::new(&config.database.url).await?;
        let auth_manager = AuthManager::new(
            config.auth.jwt_secret.as_bytes(),
            config.auth.token_expiry_hours,
        );
        Ok(Self::new(database, auth_manager, Arc::new(config)))
    }
}
