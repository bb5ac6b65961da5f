//! Introspection response caching subsystem.
//!
//! # Data Flow
//! ```text
//! process start
//!     → snapshot file (JSON {timestamp, data})
//!     → load into the in-memory slot (any failure → empty cache)
//!
//! per request (introspection only)
//!     → get(): slot payload while younger than TTL
//!     → put(): overwrite slot, then best-effort rewrite of the snapshot
//! ```
//!
//! # Design Decisions
//! - Exactly one slot; the cache is keyed by "is introspection", nothing else
//! - Memory is authoritative; the snapshot is only read at startup
//! - Disk failures never reach the request path

pub mod introspection;

pub use introspection::{CacheSnapshot, IntrospectionCache, INTROSPECTION_TTL_MS};
