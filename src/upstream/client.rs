//! Request forwarding to upstream services.
//!
//! # Responsibilities
//! - Rewrite the request URI to the group's upstream (scheme + authority only)
//! - Stream the request body through without buffering
//! - Relay the upstream response unchanged
//!
//! # Design Decisions
//! - No retries: upstream failures are terminal for the request
//! - Upstream HTTP errors (4xx/5xx) are relayed verbatim, only transport
//!   failures become `DownstreamFailure`
//! - An upstream that sends no response head within `request_secs` is a
//!   transport failure too

use std::time::Duration;

use axum::body::Body;
use axum::http::uri::{PathAndQuery, Scheme};
use axum::http::{Request, Response, Uri, Version};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::{TimeoutConfig, UpstreamsConfig, ValidationError};
use crate::error::GatewayError;
use crate::routing::HandlerGroup;
use crate::upstream::registry::UpstreamRegistry;

/// HTTP client bound to the resolved upstream registry.
#[derive(Clone, Debug)]
pub struct UpstreamClient {
    registry: std::sync::Arc<UpstreamRegistry>,
    client: Client<HttpConnector, Body>,
    request_timeout: Duration,
}

impl UpstreamClient {
    pub fn new(registry: UpstreamRegistry, timeouts: &TimeoutConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(timeouts.connect_secs)));

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            registry: std::sync::Arc::new(registry),
            client,
            request_timeout: Duration::from_secs(timeouts.request_secs),
        }
    }

    pub fn from_config(
        upstreams: &UpstreamsConfig,
        timeouts: &TimeoutConfig,
    ) -> Result<Self, ValidationError> {
        Ok(Self::new(UpstreamRegistry::from_config(upstreams)?, timeouts))
    }

    pub fn registry(&self) -> &UpstreamRegistry {
        &self.registry
    }

    /// Forward `request` to the upstream serving `group`.
    pub async fn forward(
        &self,
        group: HandlerGroup,
        request: Request<Body>,
    ) -> Result<Response<Body>, GatewayError> {
        let upstream = self
            .registry
            .get(group)
            .ok_or_else(|| GatewayError::DownstreamFailure {
                group,
                source: "no upstream configured".into(),
            })?;

        let (mut parts, body) = request.into_parts();

        let mut uri_parts = parts.uri.clone().into_parts();
        uri_parts.scheme = Some(Scheme::HTTP);
        uri_parts.authority = Some(upstream.authority.clone());
        if uri_parts.path_and_query.is_none() {
            uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
        }
        parts.uri = Uri::from_parts(uri_parts).unwrap_or(parts.uri);
        // The connector speaks HTTP/1.1 to upstreams regardless of the inbound version.
        parts.version = Version::HTTP_11;

        tracing::debug!(
            group = %group,
            method = %parts.method,
            uri = %parts.uri,
            "Forwarding request"
        );

        let pending = self.client.request(Request::from_parts(parts, body));
        let response: Response<Incoming> = tokio::time::timeout(self.request_timeout, pending)
            .await
            .map_err(|elapsed| GatewayError::DownstreamFailure {
                group,
                source: Box::new(elapsed),
            })?
            .map_err(|e| GatewayError::DownstreamFailure {
                group,
                source: Box::new(e),
            })?;

        Ok(response.map(Body::new))
    }
}
