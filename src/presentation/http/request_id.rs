// src/presentation/http/request_id.rs
//! `X-Request-ID` correlation: accepted from the client or generated, recorded
//! on the request span and echoed on the response.

use axum::{body::Body, http::Request};
use tracing::Span;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn request_id(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
}

/// Span for `TraceLayer`. Runs after the id has been set on the request.
pub fn make_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = request_id(request).unwrap_or("-"),
    )
}
