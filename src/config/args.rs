//! Command-line startup parameters.
//!
//! Every flag can also be supplied through the environment variable named
//! next to it, so the shim can be started from a `.env`-driven dev script.

use clap::Parser;

use crate::config::schema::{
    CorsConfig, ListenerConfig, RouteConfig, ShimConfig, UpstreamConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "cors-shim")]
#[command(about = "Same-origin forwarding shim that adds CORS headers to a remote API", long_about = None)]
pub struct ShimArgs {
    /// Address to listen on.
    #[arg(long, env = "SHIM_BIND", default_value = "0.0.0.0:3000")]
    pub bind: String,

    /// Path prefix that is stripped before forwarding.
    #[arg(long, env = "SHIM_PREFIX", default_value = "/api/mingdao")]
    pub prefix: String,

    /// Upstream origin requests are forwarded to.
    #[arg(long, env = "SHIM_UPSTREAM", default_value = "https://api.mingdao.com")]
    pub upstream: String,

    /// Give up on an upstream call after this many seconds.
    #[arg(long, env = "SHIM_UPSTREAM_TIMEOUT_SECS")]
    pub upstream_timeout_secs: Option<u64>,

    /// Relay the upstream body along with 4xx/5xx statuses.
    #[arg(long, env = "SHIM_RELAY_ERROR_BODY")]
    pub relay_error_body: bool,

    /// Largest request body accepted from the browser.
    #[arg(long, env = "SHIM_MAX_BODY_BYTES", default_value_t = 2 * 1024 * 1024)]
    pub max_body_bytes: usize,

    /// Requests processed at once; 1 serves strictly one at a time.
    #[arg(long, env = "SHIM_MAX_IN_FLIGHT", default_value_t = 1)]
    pub max_in_flight: usize,

    /// Ignore HTTP(S)_PROXY for upstream calls.
    #[arg(long, env = "SHIM_NO_SYSTEM_PROXY")]
    pub no_system_proxy: bool,
}

impl ShimArgs {
    /// Build the shim configuration from parsed arguments.
    ///
    /// A trailing slash on the prefix is tolerated and removed here, so
    /// `/api/mingdao/` and `/api/mingdao` mean the same route.
    pub fn into_config(self) -> ShimConfig {
        let path_prefix = match self.prefix.trim_end_matches('/') {
            "" => self.prefix.clone(),
            trimmed => trimmed.to_string(),
        };

        ShimConfig {
            listener: ListenerConfig {
                bind_address: self.bind,
                max_in_flight: self.max_in_flight,
            },
            routes: vec![RouteConfig {
                path_prefix,
                upstream: self.upstream,
                ..RouteConfig::default()
            }],
            upstream: UpstreamConfig {
                timeout_secs: self.upstream_timeout_secs,
                relay_error_body: self.relay_error_body,
                max_body_bytes: self.max_body_bytes,
                use_system_proxy: !self.no_system_proxy,
            },
            cors: CorsConfig::default(),
        }
    }
}
