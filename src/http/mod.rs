//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, /graphql handler)
//!     → request.rs (request ID set/propagate)
//!     → [classifier + cache decide: serve locally or forward]
//!     → playground.rs (GET /graphql static asset)
//!     → Send to client
//! ```

pub mod playground;
pub mod request;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
