//! Semantic configuration checks, separate from serde's syntactic layer.

use std::net::SocketAddr;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem found in a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed config, collecting every problem rather than stopping at
/// the first.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address".into(),
            message: format!("not a socket address: {}", config.listener.bind_address),
        });
    }
    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError {
            field: "listener.max_body_bytes".into(),
            message: "must be nonzero".into(),
        });
    }

    match Url::parse(&config.upstream.url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError {
            field: "upstream.url".into(),
            message: format!("unsupported scheme: {}", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError {
            field: "upstream.url".into(),
            message: e.to_string(),
        }),
    }

    if config.cache.snapshot_path.is_empty() {
        errors.push(ValidationError {
            field: "cache.snapshot_path".into(),
            message: "must not be empty".into(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
