//! Upstream forwarding subsystem.
//!
//! # Responsibilities
//! - Hold the one HTTP client the proxy talks to the upstream with
//! - Forward GraphQL bodies verbatim with the resolved Authorization header
//! - Translate upstream failures into the proxy's error taxonomy
//!
//! # Design Decisions
//! - TLS relaxation is an explicit config flag on this client only, never a
//!   process-wide TLS default
//! - No retries; the handler relays exactly one upstream attempt

pub mod forwarder;

pub use forwarder::{UpstreamError, UpstreamForwarder, UpstreamResponse};
