//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the gateway handler
//! - Wire up middleware (request ID, tracing, origin policy, CORS headers)
//! - Dispatch requests through the route table
//! - Forward requests to upstream handler groups
//! - Serve until the shutdown signal fires

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    middleware,
    response::{IntoResponse, Response},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{ConfigError, GatewayConfig};
use crate::error::GatewayError;
use crate::http::middleware::{cors_layer, cors_middleware};
use crate::http::request::{make_span, request_id, UuidRequestId, X_REQUEST_ID};
use crate::lifecycle::startup;
use crate::observability::metrics;
use crate::routing::{RouteTable, Target};
use crate::security::OriginPolicy;
use crate::upstream::UpstreamClient;

/// Body returned by the liveness route.
pub const LIVENESS_BODY: &str = "Hello World!";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub upstreams: UpstreamClient,
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
    config: Arc<GatewayConfig>,
    policy: Arc<OriginPolicy>,
    upstreams: UpstreamClient,
}

impl GatewayServer {
    /// Build the origin policy, route table and upstream client.
    pub fn new(config: GatewayConfig) -> Result<Self, ConfigError> {
        let policy = Arc::new(OriginPolicy::from_config(&config));
        let upstreams = UpstreamClient::from_config(&config.upstreams, &config.timeouts)
            .map_err(|e| ConfigError::Validation(vec![e]))?;

        let state = AppState {
            routes: Arc::new(RouteTable::standard()),
            upstreams: upstreams.clone(),
        };

        let router = Self::build_router(state, policy.clone());
        Ok(Self {
            router,
            config: Arc::new(config),
            policy,
            upstreams,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState, policy: Arc<OriginPolicy>) -> Router {
        Router::new()
            .fallback(gateway_handler)
            .with_state(state)
            .layer(cors_layer())
            .layer(middleware::from_fn_with_state(policy, cors_middleware))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http().make_span_with(make_span))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Log the resolved policy and upstreams.
    pub fn log_startup(&self) {
        startup::log_summary(&self.config, &self.policy, self.upstreams.registry());
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn policy(&self) -> &OriginPolicy {
        &self.policy
    }
}

/// Main gateway handler.
/// Looks up the route and forwards to its handler group.
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&request).to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match state.routes.dispatch(&path) {
        Some(Target::Upstream(group)) => match state.upstreams.forward(group, request).await {
            Ok(response) => {
                metrics::record_request(method.as_str(), response.status().as_u16(), group.name(), start_time);
                response
            }
            Err(e) => {
                tracing::error!(request_id = %request_id, group = %group, error = %e, "Upstream error");
                metrics::record_request(method.as_str(), e.status().as_u16(), group.name(), start_time);
                e.into_response()
            }
        },
        Some(Target::Liveness) if method == Method::GET || method == Method::HEAD => {
            metrics::record_request(method.as_str(), 200, "liveness", start_time);
            LIVENESS_BODY.into_response()
        }
        _ => {
            tracing::warn!(request_id = %request_id, method = %method, path = %path, "No route matched");
            metrics::record_request(method.as_str(), 404, "none", start_time);
            GatewayError::RouteNotFound { method, path }.into_response()
        }
    }
}
