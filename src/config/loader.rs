//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

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
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ProxyConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay the process environment onto an already-loaded config.
///
/// Recognized variables match the original deployment surface:
/// `PORT` (listener port), `TMDB_API_TOKEN` (static bearer token),
/// `TMDB_UPSTREAM_URL` (upstream endpoint).
pub fn apply_env_overrides(config: &mut ProxyConfig) {
    if let Ok(port) = std::env::var("PORT") {
        if port.parse::<u16>().is_ok() {
            config.listener.bind_address = format!("0.0.0.0:{}", port);
        } else {
            tracing::warn!(port = %port, "Ignoring unparseable PORT override");
        }
    }
    if let Ok(token) = std::env::var("TMDB_API_TOKEN") {
        if !token.is_empty() {
            config.upstream.bearer_token = Some(token);
        }
    }
    if let Ok(url) = std::env::var("TMDB_UPSTREAM_URL") {
        if !url.is_empty() {
            config.upstream.url = url;
        }
    }
}
