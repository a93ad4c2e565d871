// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-only configuration plus typed database URL parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the Foodapi server
//!
//! - **Environment**: server configuration from environment variables
//! - **Database**: typed `DATABASE_URL` parsing

/// Database URL parsing
pub mod database;
/// Environment and server configuration
pub mod environment;

pub use database::{DatabaseConfig, DatabaseUrl};
pub use environment::{Environment, ServerConfig};
