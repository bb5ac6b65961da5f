//! Introspection query classification.
//!
//! # Responsibilities
//! - Decide whether an inbound request asks for the API schema
//! - Stay cheap and infallible on malformed input
//!
//! # Design Decisions
//! - Syntactic heuristic: `operationName == "IntrospectionQuery"` or a query
//!   document opening with `query [Name] { __schema {`
//! - Deliberately NOT a GraphQL parser; near-miss documents (aliased or
//!   nested `__schema` selections) classify as regular queries and are
//!   forwarded uncached, which is always safe

use regex::Regex;
use std::sync::LazyLock;

/// Matches a query document whose root selection is `__schema`, with
/// whitespace-flexible tokens and an optional operation name.
static SCHEMA_QUERY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*query\s+(\w+\s+)?\{\s*__schema\s*\{").unwrap());

/// Classify a GraphQL request as a schema introspection query.
///
/// Pure function; absent inputs classify as `false`.
pub fn is_introspection(operation_name: Option<&str>, query: Option<&str>) -> bool {
    if operation_name == Some("IntrospectionQuery") {
        return true;
    }
    match query {
        Some(q) => SCHEMA_QUERY.is_match(q.trim()),
        None => false,
    }
}
