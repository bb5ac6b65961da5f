//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so a minimal (or absent) config file works.

use serde::{Deserialize, Serialize};

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address, body limits).
    pub listener: ListenerConfig,

    /// The single upstream GraphQL endpoint.
    pub upstream: UpstreamConfig,

    /// Introspection cache settings.
    pub cache: CacheConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:2025").
    pub bind_address: String,

    /// Maximum inbound body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds (whole inbound request, upstream included).
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:2025".to_string(),
            max_body_bytes: 10 * 1024 * 1024,
            request_timeout_secs: 60,
        }
    }
}

/// Upstream endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Upstream GraphQL URL.
    pub url: String,

    /// Static bearer token injected when the caller sends no Authorization
    /// header. The raw token, without the "Bearer " prefix.
    pub bearer_token: Option<String>,

    /// Accept self-signed/invalid upstream certificates. Scoped to the one
    /// upstream client; the known TMDB endpoint needs it.
    pub danger_accept_invalid_certs: bool,

    /// Upstream request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: "https://tmdb.apps.quintero.io".to_string(),
            bearer_token: None,
            danger_accept_invalid_certs: true,
            request_timeout_secs: 30,
        }
    }
}

/// Introspection cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Snapshot file path, relative to the working directory.
    pub snapshot_path: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            snapshot_path: "introspection-cache.json".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
