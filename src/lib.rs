// ABOUTME: Main library entry point for the Foodapi recipe-sharing backend
// ABOUTME: Provides the REST API, storage layer, services, and ambient configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Foodapi Server
//!
//! A REST backend for sharing recipes. Users publish recipes built from a
//! reference catalog of ingredients and tags, mark recipes as favorites,
//! collect them in a shopping cart, follow other authors, and download an
//! aggregated shopping list for everything in their cart.
//!
//! ## Architecture
//!
//! - **Database**: `SQLite` storage through manager structs and repository traits
//! - **Services**: recipe composition, relation toggles, shopping-list aggregation
//! - **Routes**: axum routers per domain, mounted under `/api`
//! - **Auth**: bearer JWT verification against a shared identity-provider secret
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use foodapi_server::config::environment::ServerConfig;
//! use foodapi_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Foodapi configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Bearer token verification and token minting
pub mod auth;

/// Environment-based configuration
pub mod config;

/// Application constants (re-exported from `foodapi-core`)
pub mod constants;

/// Storage layer: connection management, schema, and per-domain managers
pub mod database;

/// Unified error handling (re-exported from `foodapi-core`)
pub mod errors;

/// Structured logging setup
pub mod logging;

/// HTTP middleware: CORS and request tracing
pub mod middleware;

/// Domain models (re-exported from `foodapi-core`)
pub mod models;

/// Pagination types and link building
pub mod pagination;

/// Shared server state handed to every router
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and server lifecycle
pub mod server;

/// Business logic on top of the storage layer
pub mod services;
