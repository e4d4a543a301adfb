//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and middleware produce:
//!     → tracing events with request_id, method, url, status fields
//!     → TraceLayer spans per request
//!
//! Consumer:
//!     → logging.rs fmt subscriber on stdout
//! ```

pub mod logging;

pub use logging::init_logging;
