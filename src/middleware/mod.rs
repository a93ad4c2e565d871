// ABOUTME: HTTP middleware for authentication, CORS, and request tracing
// ABOUTME: Provides request ID spans and bearer-token user resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod auth;
pub mod cors;
pub mod tracing;

// Authentication middleware
pub use auth::AuthMiddleware;

// CORS configuration
pub use cors::setup_cors;

// Request tracing
pub use tracing::{
    create_request_span, record_response, MakeRequestIdentifier, REQUEST_ID_HEADER,
};
