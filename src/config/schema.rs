//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the shim.
//! Every section has defaults that reproduce the stock Mingdao setup, so an
//! empty command line yields a working shim on port 3000.

/// Root configuration for the forwarding shim.
#[derive(Debug, Clone, Default)]
pub struct ShimConfig {
    /// Listener configuration (bind address, in-flight limit).
    pub listener: ListenerConfig,

    /// Route definitions mapping path prefixes to upstream origins.
    pub routes: Vec<RouteConfig>,

    /// Upstream call settings.
    pub upstream: UpstreamConfig,

    /// CORS headers overlaid on relayed and pre-flight responses.
    pub cors: CorsConfig,
}

impl ShimConfig {
    /// Configuration with the stock Mingdao route installed.
    pub fn with_default_route() -> Self {
        Self {
            routes: vec![RouteConfig::default()],
            ..Self::default()
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Maximum number of requests processed at once across the whole shim.
    pub max_in_flight: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            max_in_flight: 1,
        }
    }
}

/// Route configuration mapping a path prefix to an upstream origin.
#[derive(Debug, Clone)]
pub struct RouteConfig {
    /// Route identifier for logging.
    pub name: String,

    /// Path prefix to match, without trailing slash (e.g. "/api/mingdao").
    pub path_prefix: String,

    /// Upstream origin the remainder of the path is appended to.
    pub upstream: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            name: "mingdao".to_string(),
            path_prefix: "/api/mingdao".to_string(),
            upstream: "https://api.mingdao.com".to_string(),
        }
    }
}

/// Upstream call settings.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Per-call timeout in seconds. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,

    /// Keep the upstream body when relaying a 4xx/5xx status.
    pub relay_error_body: bool,

    /// Largest request body read from the caller.
    pub max_body_bytes: usize,

    /// Honor HTTP(S)_PROXY environment variables for upstream calls.
    pub use_system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            relay_error_body: false,
            max_body_bytes: 2 * 1024 * 1024, // 2MB
            use_system_proxy: true,
        }
    }
}

/// CORS header values.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allow_origin: String,
    pub allow_methods: String,
    pub allow_headers: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_methods: "POST, PUT, DELETE, OPTIONS".to_string(),
            allow_headers: "*".to_string(),
        }
    }
}
