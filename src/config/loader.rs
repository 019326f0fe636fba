//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::HandlerGroup;
use crate::security::Mode;

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_VAR: &str = "GATEWAY_CONFIG";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

impl GatewayConfig {
    /// Resolve the startup configuration.
    ///
    /// Loads `.env` if present, then the file named by `GATEWAY_CONFIG`
    /// (or defaults), then applies environment overrides and validates.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) if !path.trim().is_empty() => read_config(Path::new(&path))?,
            _ => GatewayConfig::default(),
        };

        let mut errors = match config.apply_env(|key| std::env::var(key).ok()) {
            Ok(()) => Vec::new(),
            Err(errors) => errors,
        };
        if let Err(mut more) = validate_config(&config) {
            errors.append(&mut more);
        }

        if errors.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// Recognised keys: `PORT`, `NODE_ENV`, `FRONTEND_URL`, `UPSTREAM_URL`,
    /// `UPSTREAM_<GROUP>_URL` and `METRICS_ADDR`. Blank `PORT`, `UPSTREAM_*`
    /// and `METRICS_ADDR` values count as unset.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), Vec<ValidationError>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = non_blank("PORT") {
            match port.trim().parse::<u16>() {
                Ok(port) => self.listener.bind_address = format!("0.0.0.0:{}", port),
                Err(_) => errors.push(ValidationError::Port(port)),
            }
        }

        if let Some(env) = lookup("NODE_ENV") {
            self.mode = Mode::from_env_value(&env);
        }

        if let Some(frontend_url) = lookup("FRONTEND_URL") {
            self.cors.frontend_url = Some(frontend_url);
        }

        if let Some(url) = non_blank("UPSTREAM_URL") {
            self.upstreams.default = url;
        }
        for group in HandlerGroup::ALL {
            let key = format!("UPSTREAM_{}_URL", group.name().to_ascii_uppercase());
            if let Some(url) = non_blank(&key) {
                self.upstreams.groups.insert(group, url);
            }
        }

        if let Some(addr) = non_blank("METRICS_ADDR") {
            self.observability.metrics_enabled = true;
            self.observability.metrics_address = addr;
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
