//! Request identification.
//!
//! Every request gets a UUID v4 `x-request-id` unless the caller sent one.
//! The id is echoed on the response and recorded on the request span.

use axum::body::Body;
use axum::http::{HeaderMap, Request};
use tracing::Span;

pub const X_REQUEST_ID: &str = "x-request-id";

pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
}

/// Span for one request, carrying its id.
pub fn make_request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id(request.headers()),
    )
}
