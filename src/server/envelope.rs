//! JSON-RPC 2.0 request and response envelopes.

use crate::error::RpcError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The only protocol version accepted.
pub const JSONRPC_VERSION: &str = "2.0";

/// An inbound call.
///
/// The protocol tag is checked on the raw object before decoding. Every field
/// is optional here so that a missing method or params still reaches method
/// routing with the caller's id.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,

    #[serde(default)]
    pub method: Option<String>,

    #[serde(default)]
    pub params: Option<Params>,

    /// `None` when the key is absent; `Some(Value::Null)` for an explicit null.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub id: Option<Value>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Call parameters, by name or by position.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Params {
    Named(Map<String, Value>),
    Positional(Vec<Value>),
}

impl Default for Params {
    fn default() -> Self {
        Params::Named(Map::new())
    }
}

/// The `error` member of a failed response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorObject {
    pub code: i64,
    pub message: String,
}

impl From<&RpcError> for ErrorObject {
    fn from(err: &RpcError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Either a `result` or an `error` member, never both.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Result(Value),
    Error(ErrorObject),
}

/// An outbound response.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    #[serde(flatten)]
    pub outcome: Outcome,
    pub id: Value,
}

impl RpcResponse {
    /// Build a success envelope.
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            outcome: Outcome::Result(result),
            id,
        }
    }

    /// Build an error envelope.
    pub fn failure(id: Value, err: &RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            outcome: Outcome::Error(err.into()),
            id,
        }
    }

    /// Whether this is an error envelope.
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error(_))
    }

    /// The error code, if this is an error envelope.
    pub fn error_code(&self) -> Option<i64> {
        match &self.outcome {
            Outcome::Error(err) => Some(err.code),
            Outcome::Result(_) => None,
        }
    }

    /// The result value, if this is a success envelope.
    pub fn result(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Result(value) => Some(value),
            Outcome::Error(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_distinguishes_absent_and_null_id() {
        let absent: RpcRequest =
            serde_json::from_value(json!({"jsonrpc": "2.0", "method": "GetAllContacts"})).unwrap();
        assert_eq!(absent.id, None);

        let null: RpcRequest = serde_json::from_value(
            json!({"jsonrpc": "2.0", "method": "GetAllContacts", "id": null}),
        )
        .unwrap();
        assert_eq!(null.id, Some(Value::Null));
    }

    #[test]
    fn test_params_shapes() {
        let named: RpcRequest =
            serde_json::from_value(json!({"params": {"name": "Json"}})).unwrap();
        assert!(matches!(named.params, Some(Params::Named(_))));

        let positional: RpcRequest =
            serde_json::from_value(json!({"params": ["Json", "+88888888"]})).unwrap();
        assert_eq!(
            positional.params,
            Some(Params::Positional(vec![json!("Json"), json!("+88888888")]))
        );

        let null: RpcRequest = serde_json::from_value(json!({"params": null})).unwrap();
        assert_eq!(null.params, None);

        let scalar: Result<RpcRequest, _> = serde_json::from_value(json!({"params": 7}));
        assert!(scalar.is_err());
    }

    #[test]
    fn test_success_envelope_shape() {
        let response = RpcResponse::success(json!(1), Value::Null);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"jsonrpc": "2.0", "result": null, "id": 1})
        );
        assert!(!response.is_error());
    }

    #[test]
    fn test_error_envelope_shape() {
        let response = RpcResponse::failure(Value::Null, &RpcError::ProtocolVersion);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "error": {"code": -32600, "message": "Invalid JSON-RPC version"},
                "id": null
            })
        );
        assert_eq!(response.error_code(), Some(-32600));
    }
}
