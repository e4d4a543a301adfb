//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation of values coming off the command line
//! - Check that every route points at a usable upstream origin
//! - Detect conflicting routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ShimConfig → Result<(), Vec<ValidationError>>
//! - Runs before the server is constructed

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::HeaderValue;
use url::Url;

use crate::config::schema::{RouteConfig, ShimConfig};

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("bind address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("max_in_flight must be greater than zero")]
    ZeroInFlight,

    #[error("max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("no routes configured")]
    NoRoutes,

    #[error("route `{route}`: path prefix `{prefix}` {reason}")]
    Prefix {
        route: String,
        prefix: String,
        reason: &'static str,
    },

    #[error("route `{route}`: duplicate path prefix `{prefix}`")]
    DuplicatePrefix { route: String, prefix: String },

    #[error("route `{route}`: upstream `{upstream}` {reason}")]
    Upstream {
        route: String,
        upstream: String,
        reason: String,
    },

    #[error("cors {field} value `{value}` is not a valid header value")]
    CorsValue { field: &'static str, value: String },
}

/// Error returned when a configuration is rejected.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ShimConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.listener.max_in_flight == 0 {
        errors.push(ValidationError::ZeroInFlight);
    }
    if config.upstream.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }
    let mut seen = HashSet::new();
    for route in &config.routes {
        validate_prefix(route, &mut errors);
        if !seen.insert(route.path_prefix.as_str()) {
            errors.push(ValidationError::DuplicatePrefix {
                route: route.name.clone(),
                prefix: route.path_prefix.clone(),
            });
        }
        if let Err(reason) = check_upstream(&route.upstream) {
            errors.push(ValidationError::Upstream {
                route: route.name.clone(),
                upstream: route.upstream.clone(),
                reason,
            });
        }
    }

    let cors = &config.cors;
    for (field, value) in [
        ("allow_origin", &cors.allow_origin),
        ("allow_methods", &cors.allow_methods),
        ("allow_headers", &cors.allow_headers),
    ] {
        if HeaderValue::from_str(value).is_err() {
            errors.push(ValidationError::CorsValue {
                field,
                value: value.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_prefix(route: &RouteConfig, errors: &mut Vec<ValidationError>) {
    let prefix = &route.path_prefix;
    let reason = if !prefix.starts_with('/') {
        Some("must start with `/`")
    } else if prefix == "/" {
        Some("must name at least one path segment")
    } else if prefix.ends_with('/') {
        Some("must not end with `/`")
    } else {
        None
    };

    if let Some(reason) = reason {
        errors.push(ValidationError::Prefix {
            route: route.name.clone(),
            prefix: prefix.clone(),
            reason,
        });
    }
}

/// An upstream must be a bare http(s) origin.
fn check_upstream(upstream: &str) -> Result<(), String> {
    let url = Url::parse(upstream).map_err(|e| format!("does not parse: {e}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("has unsupported scheme `{}`", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("has no host".to_string());
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err("must be an origin without path, query or fragment".to_string());
    }
    Ok(())
}
