//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Look up matching route for a request URI
//! - Return the rewritten upstream URL or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) path prefix scan (acceptable for typical route counts)
//! - Longest prefix wins
//! - Explicit NoMatch rather than silent default

use axum::http::{HeaderValue, Uri};
use url::Url;

use crate::config::RouteConfig;
use crate::routing::matcher::PathPrefixMatcher;

/// Error raised when a route cannot be compiled.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("route `{route}`: invalid upstream `{upstream}`: {source}")]
    Upstream {
        route: String,
        upstream: String,
        #[source]
        source: url::ParseError,
    },

    #[error("route `{route}`: upstream `{upstream}` has no host")]
    MissingHost { route: String, upstream: String },

    #[error("route `{route}`: upstream host `{host}` is not a valid header value")]
    HostHeader { route: String, host: String },
}

/// A compiled route.
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    matcher: PathPrefixMatcher,
    /// Upstream origin without trailing slash.
    origin: String,
    /// Value sent as the outbound `host` header.
    host: HeaderValue,
}

impl Route {
    pub fn compile(config: &RouteConfig) -> Result<Self, RouteError> {
        let url = Url::parse(&config.upstream).map_err(|source| RouteError::Upstream {
            route: config.name.clone(),
            upstream: config.upstream.clone(),
            source,
        })?;

        let host = url.host_str().ok_or_else(|| RouteError::MissingHost {
            route: config.name.clone(),
            upstream: config.upstream.clone(),
        })?;
        // `port()` is None when the scheme default is used.
        let authority = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        let host = HeaderValue::from_str(&authority).map_err(|_| RouteError::HostHeader {
            route: config.name.clone(),
            host: authority.clone(),
        })?;

        Ok(Self {
            name: config.name.clone(),
            matcher: PathPrefixMatcher::new(config.path_prefix.clone()),
            origin: url.origin().ascii_serialization(),
            host,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> &str {
        self.matcher.prefix()
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn host(&self) -> &HeaderValue {
        &self.host
    }
}

/// A resolved forwarding target.
#[derive(Debug)]
pub struct Target<'a> {
    pub route: &'a Route,
    /// Upstream origin followed by the stripped path and query.
    pub url: String,
}

/// Immutable routing table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Compile routes, ordering them so the longest prefix is tried first.
    pub fn from_config(configs: &[RouteConfig]) -> Result<Self, RouteError> {
        let mut routes = configs
            .iter()
            .map(Route::compile)
            .collect::<Result<Vec<_>, _>>()?;
        routes.sort_by(|a, b| b.prefix().len().cmp(&a.prefix().len()));
        Ok(Self { routes })
    }

    /// Resolve a request URI to its upstream URL.
    pub fn resolve(&self, uri: &Uri) -> Option<Target<'_>> {
        let path_and_query = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path());

        self.routes
            .iter()
            .filter(|route| route.matcher.matches(uri.path()))
            .find_map(|route| {
                let rest = route.matcher.strip(path_and_query)?;
                Some(Target {
                    route,
                    url: format!("{}{}", route.origin, rest),
                })
            })
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}
