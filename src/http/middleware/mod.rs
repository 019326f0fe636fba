//! Request middleware applied ahead of route dispatch.

pub mod cors;

pub use cors::{cors_layer, cors_middleware};
