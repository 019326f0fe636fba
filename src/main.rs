//! Tournament Gateway
//!
//! Front-door HTTP gateway built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌───────────────────────────────────────────────┐
//!                         │                   GATEWAY                     │
//!     Client Request      │  ┌────────────┐   ┌─────────┐   ┌──────────┐  │
//!     ────────────────────┼─▶│ request id │──▶│  CORS   │──▶│ routing  │  │
//!                         │  │  + trace   │   │ policy  │   │  table   │  │
//!                         │  └────────────┘   └────┬────┘   └────┬─────┘  │
//!                         │                   deny │             │        │
//!     Client Response     │                        ▼             ▼        │
//!     ◀───────────────────┼──────────────────── 403      ┌──────────────┐ │
//!                         │                              │   upstream   │─┼──▶ teams / players /
//!                         │                              │    client    │ │    classes / ... service
//!                         │                              └──────────────┘ │
//!                         └───────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::net::TcpListener;

use tournament_gateway::config::{GatewayConfig, ObservabilityConfig};
use tournament_gateway::lifecycle::{signals, Shutdown};
use tournament_gateway::observability::{logging, metrics};
use tournament_gateway::GatewayServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = GatewayConfig::from_env();

    let filter = config
        .as_ref()
        .map(|c| c.observability.log_filter.clone())
        .unwrap_or_else(|_| ObservabilityConfig::default().log_filter);
    logging::init(&filter);

    let config = config.inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
    })?;

    tracing::info!("tournament-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let bind_address = config.listener.bind_address.clone();
    let server = GatewayServer::new(config)?;
    server.log_startup();

    // Bind last: no request is accepted before the policy and routes exist.
    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown);

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
