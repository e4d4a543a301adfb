//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, query)
//!     → router.rs (route lookup)
//!     → matcher.rs (prefix match + strip)
//!     → Return: Target (route + upstream URL) or NoMatch
//!
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → Parse upstream origin, derive host header
//!     → Sort by prefix length
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same route
//! - No match is always a 404, whatever the method

pub mod matcher;
pub mod router;

pub use router::{Route, RouteError, RouteTable, Target};
