//! GraphQL request inspection.
//!
//! # Data Flow
//! ```text
//! inbound JSON body
//!     → request.rs (deserialize {query, operationName, variables})
//!     → classifier.rs (is this a schema introspection query?)
//!     → [http handler decides: cache hit / forward]
//! ```
//!
//! # Design Decisions
//! - Classification is a syntactic heuristic, never a full GraphQL parse
//! - Missing or malformed fields classify as "not introspection", never error

pub mod classifier;
pub mod request;

pub use classifier::is_introspection;
pub use request::{error_envelope, GraphQLRequest};
