//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by method, status, handler group
//! - `gateway_request_duration_seconds` (histogram): latency by handler group
//! - `gateway_policy_rejections_total` (counter): requests denied by the origin policy

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed request.
pub fn record_request(method: &str, status: u16, group: &str, start: Instant) {
    metrics::counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "group" => group.to_string()
    )
    .increment(1);

    metrics::histogram!("gateway_request_duration_seconds", "group" => group.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_policy_rejection() {
    metrics::counter!("gateway_policy_rejections_total").increment(1);
}
