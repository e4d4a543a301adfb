//! Same-origin forwarding shim with permissive CORS.
//!
//! ```text
//!   Browser ──▶ /api/mingdao/<rest> ──▶ shim ──▶ https://api.mingdao.com/<rest>
//!   Browser ◀── status + body + CORS ◀── shim ◀── upstream response
//! ```
//!
//! The `probe` module backs the `api-probe` binary, a one-off diagnostic for
//! the upstream's authentication header names.

// Core subsystems
pub mod config;
pub mod error;
pub mod http;
pub mod routing;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

// Diagnostics
pub mod probe;

pub use config::ShimConfig;
pub use error::ShimError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
