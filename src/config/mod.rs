//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional, dotenvy)
//!     → GATEWAY_CONFIG TOML file (optional)
//!     → loader.rs (parse & deserialize, apply PORT / NODE_ENV / FRONTEND_URL / UPSTREAM_* overrides)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is resolved once at startup; there is no hot reload
//! - All fields have defaults to allow running with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    CorsConfig, GatewayConfig, ListenerConfig, ObservabilityConfig, TimeoutConfig,
    UpstreamsConfig,
};
pub use validation::{validate_config, ValidationError};
