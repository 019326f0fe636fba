//! Startup orchestration.
//!
//! # Responsibilities
//! - Report the resolved configuration before traffic is accepted
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently

use crate::config::GatewayConfig;
use crate::security::OriginPolicy;
use crate::upstream::UpstreamRegistry;

/// Log the allow-list, mode and upstreams the gateway will run with.
pub fn log_summary(config: &GatewayConfig, policy: &OriginPolicy, upstreams: &UpstreamRegistry) {
    let origins: Vec<&str> = policy.allow_list().iter().collect();

    tracing::info!(origins = ?origins, "CORS allow-list configured");
    tracing::info!(mode = %policy.mode(), "Origin policy mode");
    tracing::info!(
        frontend_url = config
            .cors
            .frontend_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or("not set"),
        "Frontend origin"
    );
    if !policy.mode().is_production() {
        tracing::warn!("Non-production mode: every cross-origin request is allowed");
    }

    for (group, upstream) in upstreams.iter() {
        tracing::info!(
            group = %group,
            mount = group.mount_path(),
            upstream = %upstream.base_url,
            "Route registered"
        );
    }
}
