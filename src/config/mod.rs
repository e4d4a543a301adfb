//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command line / environment
//!     → args.rs (clap parse)
//!     → schema.rs (ShimConfig with defaults)
//!     → validation.rs (semantic checks)
//!     → ShimConfig (validated, immutable)
//!     → handed to HttpServer at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults matching the stock Mingdao setup
//! - Validation separates syntactic (clap) from semantic checks

pub mod args;
pub mod schema;
pub mod validation;

pub use args::ShimArgs;
pub use schema::{CorsConfig, ListenerConfig, RouteConfig, ShimConfig, UpstreamConfig};
pub use validation::{validate_config, ConfigError, ValidationError};
