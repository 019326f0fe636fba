//! Upstream address resolution.
//!
//! # Responsibilities
//! - Resolve every handler group to its upstream base URL at startup
//! - Provide the URI authority used when forwarding

use std::collections::HashMap;
use std::str::FromStr;

use axum::http::uri::Authority;
use url::Url;

use crate::config::{UpstreamsConfig, ValidationError};
use crate::routing::HandlerGroup;

/// A resolved upstream service.
#[derive(Debug, Clone)]
pub struct Upstream {
    /// The configured base URL.
    pub base_url: Url,
    /// Pre-computed `host:port` used to rewrite request URIs.
    pub authority: Authority,
}

impl Upstream {
    pub fn parse(scope: &str, raw: &str) -> Result<Self, ValidationError> {
        let fail = |reason: String| ValidationError::UpstreamUrl {
            scope: scope.to_string(),
            url: raw.to_string(),
            reason,
        };

        let base_url = Url::parse(raw).map_err(|e| fail(e.to_string()))?;
        let host = base_url
            .host_str()
            .ok_or_else(|| fail("missing host".to_string()))?;
        let port = base_url
            .port_or_known_default()
            .ok_or_else(|| fail("missing port".to_string()))?;
        let authority = Authority::from_str(&format!("{}:{}", host, port))
            .map_err(|e| fail(e.to_string()))?;

        Ok(Self { base_url, authority })
    }
}

/// Maps handler groups to their upstream services.
#[derive(Debug)]
pub struct UpstreamRegistry {
    groups: HashMap<HandlerGroup, Upstream>,
}

impl UpstreamRegistry {
    /// Resolve every handler group from configuration.
    pub fn from_config(config: &UpstreamsConfig) -> Result<Self, ValidationError> {
        let mut groups = HashMap::new();
        for group in HandlerGroup::ALL {
            let upstream = Upstream::parse(group.name(), config.url_for(group))?;
            tracing::debug!(group = %group, upstream = %upstream.base_url, "Upstream resolved");
            groups.insert(group, upstream);
        }
        Ok(Self { groups })
    }

    /// Upstream for the given group.
    pub fn get(&self, group: HandlerGroup) -> Option<&Upstream> {
        self.groups.get(&group)
    }

    /// All resolved upstreams, for startup logging.
    pub fn iter(&self) -> impl Iterator<Item = (HandlerGroup, &Upstream)> {
        HandlerGroup::ALL
            .into_iter()
            .filter_map(|group| self.groups.get(&group).map(|u| (group, u)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_fall_back_to_default() {
        let mut config = UpstreamsConfig::default();
        config
            .groups
            .insert(HandlerGroup::Auth, "http://auth.internal:4100".into());

        let registry = UpstreamRegistry::from_config(&config).unwrap();
        assert_eq!(registry.get(HandlerGroup::Auth).unwrap().authority.as_str(), "auth.internal:4100");
        assert_eq!(registry.get(HandlerGroup::Teams).unwrap().authority.as_str(), "127.0.0.1:3000");
        assert_eq!(registry.iter().count(), HandlerGroup::ALL.len());
    }

    #[test]
    fn test_known_default_port() {
        let upstream = Upstream::parse("default", "http://core.internal").unwrap();
        assert_eq!(upstream.authority.as_str(), "core.internal:80");
    }

    #[test]
    fn test_invalid_url_rejected() {
        let config = UpstreamsConfig {
            default: "not a url".into(),
            ..Default::default()
        };
        assert!(UpstreamRegistry::from_config(&config).is_err());
    }
}
