//! TMDB GraphQL Caching Proxy
//!
//! A forwarding gateway built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │               CACHING PROXY                    │
//!                    │                                                │
//!   POST /graphql    │  ┌─────────┐   ┌────────────┐   ┌──────────┐  │
//!   ─────────────────┼─▶│  http   │──▶│  graphql   │──▶│  cache   │  │
//!                    │  │ server  │   │ classifier │   │ (1 slot) │  │
//!                    │  └─────────┘   └────────────┘   └────┬─────┘  │
//!                    │       │            miss │ hit        │        │
//!                    │       │                 ▼            │        │
//!                    │       │          ┌────────────┐      │        │
//!   Response         │       │          │  upstream  │──────┘        │
//!   ◀────────────────┼───────┴──────────│ forwarder  │◀──────────────┼──── TMDB
//!                    │                  └────────────┘                │     GraphQL API
//!                    │                                                │
//!                    │  config / observability cross-cutting          │
//!                    └───────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tmdb_graphql_proxy::config::{apply_env_overrides, load_config, validation::validate_config};
use tmdb_graphql_proxy::observability::metrics;
use tmdb_graphql_proxy::{HttpServer, ProxyConfig};

/// Caching proxy for the TMDB GraphQL API.
#[derive(Debug, Parser)]
#[command(name = "tmdb-graphql-proxy", version)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tmdb_graphql_proxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("tmdb-graphql-proxy v0.1.0 starting");

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    apply_env_overrides(&mut config);
    if let Err(errors) = validate_config(&config) {
        for err in &errors {
            tracing::error!(%err, "Invalid configuration");
        }
        return Err(format!("{} configuration error(s)", errors.len()).into());
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.url,
        snapshot_path = %config.cache.snapshot_path,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Create and run HTTP server
    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
