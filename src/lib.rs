//! Tournament Gateway Library
//!
//! Front-door HTTP gateway for the tournament-management backend. Every
//! request passes the origin policy first, then the ordered route table
//! forwards it to one of the resource services.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;
pub mod upstream;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
