//! GraphQL wire types and the error envelope.

use serde::Deserialize;
use serde_json::{json, Value};

/// The subset of a GraphQL POST body the proxy inspects.
///
/// Everything is optional: clients may omit `operationName`, send bare
/// queries, or send no recognizable body at all. The full original body is
/// forwarded verbatim regardless; this type only feeds classification.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    /// Operation to execute, e.g. `IntrospectionQuery`.
    pub operation_name: Option<String>,

    /// The query document text.
    pub query: Option<String>,

    /// Operation variables, forwarded opaquely.
    #[serde(default)]
    pub variables: Option<Value>,
}

impl GraphQLRequest {
    /// Extract classification inputs from an already-parsed body.
    ///
    /// A non-object body (or one with unexpected field types) yields empty
    /// inputs rather than an error.
    pub fn from_body(body: &Value) -> Self {
        serde_json::from_value(body.clone()).unwrap_or_default()
    }
}

/// Build the uniform caller-visible error envelope:
/// `{"errors": [{"message": <message>}]}`.
pub fn error_envelope(message: impl Into<String>) -> Value {
    json!({
        "errors": [{ "message": message.into() }]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_body() {
        let body = json!({
            "operationName": "IntrospectionQuery",
            "query": "query IntrospectionQuery { __schema { types { name } } }",
            "variables": {"id": 1},
        });
        let req = GraphQLRequest::from_body(&body);
        assert_eq!(req.operation_name.as_deref(), Some("IntrospectionQuery"));
        assert!(req.query.is_some());
        assert!(req.variables.is_some());
    }

    #[test]
    fn tolerates_missing_fields() {
        let req = GraphQLRequest::from_body(&json!({}));
        assert!(req.operation_name.is_none());
        assert!(req.query.is_none());
    }

    #[test]
    fn tolerates_non_object_body() {
        let req = GraphQLRequest::from_body(&json!("not a request"));
        assert!(req.operation_name.is_none());
        assert!(req.query.is_none());
    }

    #[test]
    fn envelope_shape() {
        let env = error_envelope("boom");
        assert_eq!(env["errors"][0]["message"], "boom");
    }
}
