//! Response construction for the caller.
//!
//! # Responsibilities
//! - Mirror the upstream status
//! - Copy upstream headers minus the ones the shim controls
//! - Overlay the CORS headers
//!
//! # Design Decisions
//! - Bodies are buffered; upstream payloads are small JSON documents
//! - 4xx/5xx relay the status and, unless configured otherwise, no body

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;

use crate::http::cors::CorsHeaders;
use crate::http::headers::relayed_headers;

/// Relay a successful upstream response.
pub fn relay(status: StatusCode, upstream: &HeaderMap, body: Bytes, cors: &CorsHeaders) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    *response.headers_mut() = relayed_headers(upstream);
    cors.apply(response.headers_mut());
    response
}

/// Relay an upstream 4xx/5xx status.
pub fn upstream_error(status: StatusCode, body: Bytes, cors: &CorsHeaders) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    cors.apply(response.headers_mut());
    response
}
