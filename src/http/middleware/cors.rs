//! CORS Middleware.
//! Enforces the origin policy before any route runs.
//!
//! `cors_middleware` sits outside `cors_layer()`: it turns a denied origin
//! into a 403 before anything is dispatched, and the inner `CorsLayer`
//! writes the allow headers and answers `OPTIONS` itself.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{AllowCredentials, AllowOrigin, CorsLayer};

use crate::error::GatewayError;
use crate::observability::metrics;
use crate::security::{Decision, OriginPolicy};

pub const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::OPTIONS,
];

pub const ALLOWED_HEADERS: [HeaderName; 2] = [header::CONTENT_TYPE, header::AUTHORIZATION];

/// Response headers for origins the policy already allowed.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        // Only sent alongside an Origin header.
        .allow_credentials(AllowCredentials::predicate(|_origin, _parts| true))
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(ALLOWED_HEADERS)
        .vary(Vec::<HeaderName>::new())
}

/// Append `Vary: Origin` unless a `Vary` value already covers it.
fn vary_on_origin(headers: &mut HeaderMap) {
    let covered = headers.get_all(header::VARY).iter().any(|value| {
        value.to_str().is_ok_and(|list| {
            list.split(',')
                .map(str::trim)
                .any(|name| name == "*" || name.eq_ignore_ascii_case("origin"))
        })
    });
    if !covered {
        headers.append(header::VARY, HeaderValue::from_static("Origin"));
    }
}

pub async fn cors_middleware(
    State(policy): State<Arc<OriginPolicy>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    // Non-ASCII bytes can never equal an allow-list entry.
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .map(|origin| String::from_utf8_lossy(origin.as_bytes()).into_owned());

    if let Some(origin) = &origin {
        if policy.decide(Some(origin)) == Decision::Deny {
            tracing::warn!(origin = %origin, path = %req.uri().path(), "Origin rejected by CORS policy");
            metrics::record_policy_rejection();
            return GatewayError::PolicyRejection {
                origin: origin.clone(),
            }
            .into_response();
        }
    }

    let is_options = req.method() == Method::OPTIONS;
    let mut response = next.run(req).await;

    // OPTIONS never reaches a handler group; the empty reply is a 204.
    if is_options {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    if origin.is_some() {
        vary_on_origin(response.headers_mut());
    }
    response
}
