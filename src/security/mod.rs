//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     GatewayConfig (mode, frontend_url)
//!     → origin.rs (AllowList + Mode → OriginPolicy)
//!
//! Incoming request:
//!     → http::middleware::cors (reads Origin header)
//!     → origin.rs decide() → Allow | Deny
//!     → Deny terminates the request before routing
//! ```
//!
//! # Design Decisions
//! - Fail closed in production: unknown origins are rejected
//! - Policy is immutable after startup, shared via Arc

pub mod origin;

pub use origin::{decide, AllowList, Decision, Mode, OriginPolicy};
