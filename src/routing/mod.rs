//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → router.rs (ordered table scan)
//!     → matcher.rs (evaluate match conditions)
//!     → Return: Target (upstream group or liveness) or no match
//!
//! Route Compilation (at startup):
//!     HandlerGroup::ALL (fixed precedence)
//!     → prefix matchers, then exact "/"
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by declaration)

pub mod matcher;
pub mod router;

pub use router::{HandlerGroup, Route, RouteTable, Target};
