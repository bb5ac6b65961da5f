//! HTTP server setup and the proxy request handler.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (timeout, body limit, request ID, tracing)
//! - Bind the server to a listener with graceful shutdown
//! - Orchestrate classify → cache lookup → forward → cache populate → relay

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::cache::IntrospectionCache;
use crate::config::ProxyConfig;
use crate::graphql::{error_envelope, is_introspection, GraphQLRequest};
use crate::http::playground::playground_handler;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, X_REQUEST_ID};
use crate::observability::metrics;
use crate::upstream::{UpstreamError, UpstreamForwarder};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<IntrospectionCache>,
    pub forwarder: Arc<UpstreamForwarder>,
    pub max_body_bytes: usize,
}

/// HTTP server for the caching proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// The introspection cache is primed from its snapshot file here; cache
    /// load problems never fail construction. Building the upstream client
    /// can fail (bad URL, unusable bearer token).
    pub fn new(config: ProxyConfig) -> Result<Self, UpstreamError> {
        let cache = Arc::new(IntrospectionCache::load(
            config.cache.snapshot_path.clone().into(),
        ));
        let forwarder = Arc::new(UpstreamForwarder::new(&config.upstream)?);

        let state = AppState {
            cache,
            forwarder,
            max_body_bytes: config.listener.max_body_bytes,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/graphql", post(graphql_handler).get(playground_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id_layer())
                    .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.listener.request_timeout_secs,
                    ))),
            )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Main proxy handler for `POST /graphql`.
///
/// One pass per request, always terminal: classify, maybe serve from cache,
/// else forward and relay (populating the cache on introspection success).
async fn graphql_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    let caller_auth = request.headers().get(header::AUTHORIZATION).cloned();

    // A missing or unparseable body classifies as "not introspection" and is
    // forwarded as an empty request object.
    let bytes = axum::body::to_bytes(request.into_body(), state.max_body_bytes)
        .await
        .unwrap_or_default();
    let body: Value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

    let gql = GraphQLRequest::from_body(&body);
    let introspection = is_introspection(gql.operation_name.as_deref(), gql.query.as_deref());

    if introspection {
        if let Some(payload) = state.cache.get() {
            tracing::debug!(
                request_id = %request_id,
                "Serving introspection response from cache"
            );
            metrics::record_cache_hit();
            metrics::record_request(200, start);
            return (StatusCode::OK, Json(payload)).into_response();
        }
        metrics::record_cache_miss();
    }

    match state.forwarder.forward(&body, caller_auth).await {
        Ok(upstream) => {
            if introspection {
                state.cache.put(upstream.body.clone());
            }
            tracing::debug!(
                request_id = %request_id,
                status = %upstream.status,
                introspection,
                "Relaying upstream response"
            );
            metrics::record_request(upstream.status.as_u16(), start);
            (upstream.status, Json(upstream.body)).into_response()
        }
        Err(err) => {
            let status = err.status();
            tracing::warn!(
                request_id = %request_id,
                status = %status,
                error = %err,
                "Upstream request failed"
            );
            metrics::record_request(status.as_u16(), start);
            (status, Json(error_envelope(err.to_string()))).into_response()
        }
    }
}

/// Liveness probe.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "Proxy server is running")
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
