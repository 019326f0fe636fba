//! Upstream subsystem.
//!
//! # Data Flow
//! ```text
//! Route matched → HandlerGroup identified
//!     → registry.rs (group → upstream authority)
//!     → client.rs (rewrite URI, forward, relay response)
//! ```
//!
//! # Design Decisions
//! - One upstream per handler group, resolved at startup
//! - Method, path, query, headers and body pass through unchanged

pub mod client;
pub mod registry;

pub use client::UpstreamClient;
pub use registry::{Upstream, UpstreamRegistry};
