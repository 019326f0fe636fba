//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, trace span)
//!     → middleware/cors.rs (origin policy; may reject or answer preflight)
//!     → routing (RouteTable::dispatch)
//!     → upstream (forward to handler group) or liveness
//!     → CORS headers added, response sent to client
//! ```

pub mod middleware;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, GatewayServer, LIVENESS_BODY};
