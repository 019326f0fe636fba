//! Gateway error taxonomy.
//!
//! Every variant is terminal for the request it occurs in; nothing here is
//! retried and nothing here stops the process.

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::routing::HandlerGroup;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Origin not on the allow-list while in production mode.
    #[error("origin '{origin}' not allowed by CORS policy")]
    PolicyRejection { origin: String },

    /// No route table entry matches the request.
    #[error("no route for {method} {path}")]
    RouteNotFound { method: Method, path: String },

    /// The upstream for a handler group could not be reached.
    #[error("upstream for {group} failed: {source}")]
    DownstreamFailure {
        group: HandlerGroup,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::PolicyRejection { .. } => StatusCode::FORBIDDEN,
            GatewayError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            GatewayError::DownstreamFailure { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        // Bodies stay generic: never echo the allow-list or upstream addresses.
        let body = match &self {
            GatewayError::PolicyRejection { .. } => "Not allowed by CORS".to_string(),
            GatewayError::RouteNotFound { method, path } => format!("Cannot {} {}", method, path),
            GatewayError::DownstreamFailure { .. } => "Upstream request failed".to_string(),
        };
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_policy_rejection_response() {
        let response = GatewayError::PolicyRejection {
            origin: "https://evil.example".into(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"Not allowed by CORS");
    }

    #[tokio::test]
    async fn test_route_not_found_response() {
        let response = GatewayError::RouteNotFound {
            method: Method::GET,
            path: "/unknown/thing".into(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"Cannot GET /unknown/thing");
    }
}
