// ABOUTME: Request tracing helpers for correlation and structured logging
// ABOUTME: Builds the per-request span used by tower-http's TraceLayer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderValue, Request, Response};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::{info, Span};
use uuid::Uuid;

/// Header carrying the request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generates `req_<uuid>` ids for requests that arrive without one
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestIdentifier;

impl MakeRequestId for MakeRequestIdentifier {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = format!("req_{}", Uuid::new_v4().simple());
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Create the tracing span for an HTTP request
///
/// `request_id` comes from `x-request-id`, which the request-id layer
/// fills in before this runs. `user_id` is recorded later by the auth
/// middleware.
pub fn create_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
        user_id = tracing::field::Empty,
        status_code = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    )
}

/// Record the response status and latency on the request span
pub fn record_response(response: &Response<Body>, latency: Duration, span: &Span) {
    let status = response.status().as_u16();
    let duration_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
    span.record("status_code", status);
    span.record("duration_ms", duration_ms);
    info!(status, duration_ms, "request completed");
}
