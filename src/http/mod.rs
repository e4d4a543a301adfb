//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, in-flight limit)
//!     → OPTIONS? → cors.rs pre-flight answer
//!     → routing (prefix → upstream URL) or 404
//!     → forward.rs (body, headers.rs filtering, upstream call)
//!     → response.rs (status mirror, header copy, cors.rs overlay)
//!     → Send to client
//! ```

pub mod cors;
pub mod forward;
pub mod headers;
pub mod request;
pub mod response;
pub mod server;

pub use cors::CorsHeaders;
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{HttpServer, ServerError};
