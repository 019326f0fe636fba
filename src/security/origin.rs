//! Origin policy engine.
//!
//! # Responsibilities
//! - Build the origin allow-list once at startup
//! - Decide, per request, whether a declared `Origin` may be served
//!
//! # Design Decisions
//! - Pure decision function; the HTTP layer owns header handling
//! - Exact string comparison (scheme + host + port), no wildcards
//! - Requests without an `Origin` header are always allowed
//! - Non-production mode allows every origin

use serde::{Deserialize, Serialize};

use crate::config::GatewayConfig;

/// Frontend origins that are always allowed.
pub const BASELINE_ORIGINS: [&str; 3] = [
    "http://localhost:3000",
    "https://ifma-campeonatos.vercel.app",
    "https://www.preifma.site",
];

/// Deployment mode, derived once from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Mode {
    Production,
    #[default]
    NonProduction,
}

impl Mode {
    /// Only the exact value `production` selects production mode.
    pub fn from_env_value(value: &str) -> Self {
        if value == "production" {
            Mode::Production
        } else {
            Mode::NonProduction
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Mode::Production)
    }
}

impl From<String> for Mode {
    fn from(value: String) -> Self {
        Mode::from_env_value(&value)
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Production => "production".to_string(),
            Mode::NonProduction => "development".to_string(),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Production => write!(f, "production"),
            Mode::NonProduction => write!(f, "non-production"),
        }
    }
}

/// Outcome of an origin check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// Ordered, duplicate-free set of permitted origins.
///
/// Insertion order is kept for startup logging only; lookups are membership tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    origins: Vec<String>,
}

impl AllowList {
    /// Build the allow-list from the baseline plus an optional extra origin.
    ///
    /// A blank `extra` is ignored entirely.
    pub fn new(extra: Option<&str>) -> Self {
        let mut origins: Vec<String> = BASELINE_ORIGINS.iter().map(|o| o.to_string()).collect();

        if let Some(extra) = extra {
            if !extra.trim().is_empty() && !origins.iter().any(|o| o == extra) {
                if extra.ends_with('/') {
                    tracing::warn!(
                        origin = %extra,
                        "Configured frontend origin has a trailing slash and will never match a browser Origin header"
                    );
                }
                origins.push(extra.to_string());
            }
        }

        Self { origins }
    }

    pub fn contains(&self, origin: &str) -> bool {
        self.origins.iter().any(|o| o == origin)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.origins.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}

/// Decide whether a request declaring `origin` may be served.
pub fn decide(origin: Option<&str>, mode: Mode, allow_list: &AllowList) -> Decision {
    let Some(origin) = origin else {
        return Decision::Allow;
    };

    if !mode.is_production() || allow_list.contains(origin) {
        Decision::Allow
    } else {
        Decision::Deny
    }
}

/// Mode and allow-list resolved together at startup.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    mode: Mode,
    allow_list: AllowList,
}

impl OriginPolicy {
    pub fn new(mode: Mode, allow_list: AllowList) -> Self {
        Self { mode, allow_list }
    }

    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(
            config.mode,
            AllowList::new(config.cors.frontend_url.as_deref()),
        )
    }

    pub fn decide(&self, origin: Option<&str>) -> Decision {
        decide(origin, self.mode, &self.allow_list)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }
}
