//! TMDB GraphQL Caching Proxy Library
//!
//! A forwarding gateway in front of a single upstream GraphQL API. It adds a
//! bearer credential, tolerates the upstream's TLS certificate, and caches
//! schema introspection responses (memory + disk snapshot, 30-day TTL) so
//! tooling that re-introspects on every launch does not hammer the upstream.

pub mod cache;
pub mod config;
pub mod graphql;
pub mod http;
pub mod observability;
pub mod upstream;

pub use cache::IntrospectionCache;
pub use config::ProxyConfig;
pub use http::HttpServer;
pub use upstream::UpstreamForwarder;
