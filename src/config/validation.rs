//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and upstream URLs
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;
use crate::routing::HandlerGroup;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("invalid PORT value '{0}'")]
    Port(String),

    #[error("invalid upstream URL '{url}' for {scope}: {reason}")]
    UpstreamUrl {
        scope: String,
        url: String,
        reason: String,
    },

    #[error("request timeout must be greater than zero")]
    ZeroRequestTimeout,

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),
}

/// Check a configuration for semantic errors.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if let Err(e) = check_upstream("default", &config.upstreams.default) {
        errors.push(e);
    }
    for group in HandlerGroup::ALL {
        if let Some(url) = config.upstreams.groups.get(&group) {
            if let Err(e) = check_upstream(group.name(), url) {
                errors.push(e);
            }
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Upstreams are reached over plain HTTP and need an explicit host.
fn check_upstream(scope: &str, raw: &str) -> Result<(), ValidationError> {
    let fail = |reason: &str| ValidationError::UpstreamUrl {
        scope: scope.to_string(),
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(raw).map_err(|e| fail(&e.to_string()))?;
    if url.scheme() != "http" {
        return Err(fail("only http upstreams are supported"));
    }
    if url.host_str().is_none() {
        return Err(fail("missing host"));
    }
    if url.path() != "/" || url.query().is_some() {
        return Err(fail("upstream URL must not carry a path or query"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.upstreams.default = "ftp://files.local".into();
        config
            .upstreams
            .groups
            .insert(HandlerGroup::Teams, "::nonsense".into());
        config
            .upstreams
            .groups
            .insert(HandlerGroup::Auth, "http://auth:4100/api".into());
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::ZeroRequestTimeout));
        assert!(matches!(errors[0], ValidationError::BindAddress(_)));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = GatewayConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::MetricsAddress("nowhere".into())]
        );
    }
}
