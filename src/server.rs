// ABOUTME: Router assembly and HTTP server lifecycle
// ABOUTME: Merges domain routers, applies tower-http layers, and serves with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, Uri};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::errors::{AppError, AppResult};
use crate::middleware::{
    create_request_span, record_response, setup_cors, MakeRequestIdentifier, REQUEST_ID_HEADER,
};
use crate::resources::ServerResources;
use crate::routes::{CatalogRoutes, HealthRoutes, RecipeRoutes, UserRoutes};

/// Build the complete application router
///
/// Layers run outermost first: request id assignment, tracing, CORS, body
/// limit, then routing. Unknown paths get a JSON 404.
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let body_limit = resources.config.max_request_body_bytes;
    let cors = setup_cors(&resources.config);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(CatalogRoutes::routes(Arc::clone(&resources)))
        .merge(RecipeRoutes::routes(Arc::clone(&resources)))
        .merge(UserRoutes::routes(resources))
        .fallback(handle_not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(create_request_span)
                .on_response(record_response),
        )
        .layer(SetRequestIdLayer::new(request_id, MakeRequestIdentifier))
}

async fn handle_not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("Path {}", uri.path()))
}

/// Bind and serve until Ctrl-C
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
pub async fn run(resources: Arc<ServerResources>) -> AppResult<()> {
    let address = format!("{}:{}", resources.config.host, resources.config.http_port);
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| AppError::config(format!("Failed to bind {address}: {e}")))?;

    info!("HTTP server listening on http://{address}");
    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("HTTP server failed: {e}")))?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}
