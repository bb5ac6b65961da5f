//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): GraphQL requests by response status
//! - `proxy_request_duration_seconds` (histogram): end-to-end latency
//! - `proxy_cache_events_total` (counter): introspection cache hits, misses,
//!   and stores

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter on `addr`. Failure to bind is logged and
/// otherwise ignored; the proxy serves traffic without metrics.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed GraphQL request.
pub fn record_request(status: u16, start: Instant) {
    metrics::counter!("proxy_requests_total", "status" => status.to_string()).increment(1);
    metrics::histogram!("proxy_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Introspection served from the cache slot.
pub fn record_cache_hit() {
    metrics::counter!("proxy_cache_events_total", "event" => "hit").increment(1);
}

/// Introspection that had to go upstream.
pub fn record_cache_miss() {
    metrics::counter!("proxy_cache_events_total", "event" => "miss").increment(1);
}

/// Cache slot (over)written with a fresh upstream response.
pub fn record_cache_store() {
    metrics::counter!("proxy_cache_events_total", "event" => "store").increment(1);
}
