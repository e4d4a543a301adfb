//! Permissive CORS headers.
//!
//! The same three headers go on every relayed response and on pre-flight
//! answers. Values are validated at startup, so they are stored as ready
//! `HeaderValue`s.

use axum::body::Body;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;

use crate::config::CorsConfig;

#[derive(Debug, thiserror::Error)]
#[error("invalid cors header value `{0}`")]
pub struct InvalidCorsValue(String);

#[derive(Debug, Clone)]
pub struct CorsHeaders {
    allow_origin: HeaderValue,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
}

impl CorsHeaders {
    pub fn from_config(config: &CorsConfig) -> Result<Self, InvalidCorsValue> {
        let value = |raw: &str| {
            HeaderValue::from_str(raw).map_err(|_| InvalidCorsValue(raw.to_string()))
        };
        Ok(Self {
            allow_origin: value(&config.allow_origin)?,
            allow_methods: value(&config.allow_methods)?,
            allow_headers: value(&config.allow_headers)?,
        })
    }

    /// Set the CORS headers, replacing any value already present.
    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
    }

    /// Answer a pre-flight request: 200, CORS headers, empty body.
    pub fn preflight(&self) -> Response {
        let mut response = Response::new(Body::empty());
        *response.status_mut() = StatusCode::OK;
        self.apply(response.headers_mut());
        response
    }
}

impl Default for CorsHeaders {
    fn default() -> Self {
        Self {
            allow_origin: HeaderValue::from_static("*"),
            allow_methods: HeaderValue::from_static("POST, PUT, DELETE, OPTIONS"),
            allow_headers: HeaderValue::from_static("*"),
        }
    }
}
