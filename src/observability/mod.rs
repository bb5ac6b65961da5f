//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured logs, request spans via TraceLayer)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout log aggregation
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - The request ID set by the http layer flows through log events
//! - Metric updates are cheap (atomic increments); recording never fails

pub mod metrics;
