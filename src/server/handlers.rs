//! JSON-RPC method handlers for the phonebook.
//!
//! [`RpcDispatcher`] is the only place where directory failures become wire
//! error codes. It holds no per-call state, so one instance serves every
//! connection.

use crate::error::{RpcError, RpcResult};
use crate::metrics::{CallTimer, Metrics};
use crate::repositories::ContactRepository;
use crate::server::envelope::{Params, RpcRequest, RpcResponse, JSONRPC_VERSION};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// The routing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    AddContact,
    GetByName,
    UpdateContact,
    DeleteContact,
    GetAllContacts,
}

impl Method {
    pub const ALL: [Method; 5] = [
        Method::AddContact,
        Method::GetByName,
        Method::UpdateContact,
        Method::DeleteContact,
        Method::GetAllContacts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::AddContact => "AddContact",
            Method::GetByName => "GetByName",
            Method::UpdateContact => "UpdateContact",
            Method::DeleteContact => "DeleteContact",
            Method::GetAllContacts => "GetAllContacts",
        }
    }
}

impl FromStr for Method {
    type Err = RpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| RpcError::MethodNotFound(s.to_string()))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AddContactParams {
    name: String,
    phone: String,
    #[serde(default)]
    email: Option<String>,
}

impl AddContactParams {
    /// Accepts named params or positional `[name, phone]` / `[name, phone, email]`.
    fn from_params(params: Params) -> RpcResult<Self> {
        match params {
            Params::Named(_) => named(Method::AddContact, params),
            Params::Positional(mut values) => {
                if !(2..=3).contains(&values.len()) {
                    return Err(RpcError::Unclassified(format!(
                        "AddContact expects positional params [name, phone, email?], got {} values",
                        values.len()
                    )));
                }
                values.resize(3, Value::Null);
                let (name, phone, email): (String, String, Option<String>) =
                    serde_json::from_value(Value::Array(values))?;
                Ok(Self { name, phone, email })
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct GetByNameParams {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct UpdateContactParams {
    id: String,
    name: String,
    phone: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeleteContactParams {
    id: String,
}

fn named<T: DeserializeOwned>(method: Method, params: Params) -> RpcResult<T> {
    match params {
        Params::Named(map) => Ok(serde_json::from_value(Value::Object(map))?),
        Params::Positional(_) => Err(RpcError::Unclassified(format!(
            "{} expects named params",
            method
        ))),
    }
}

/// The id to echo: the caller's, or a fresh one when the key was absent.
fn correlation_id(id: Option<Value>) -> Value {
    id.unwrap_or_else(|| Value::String(Uuid::new_v4().to_string()))
}

/// Translates JSON-RPC calls into directory operations.
#[derive(Clone)]
pub struct RpcDispatcher {
    directory: Arc<dyn ContactRepository>,
    metrics: Metrics,
}

impl RpcDispatcher {
    /// Create a dispatcher over the given directory.
    pub fn new(directory: Arc<dyn ContactRepository>) -> Self {
        Self {
            directory,
            metrics: Metrics::new(),
        }
    }

    /// Call counters for this dispatcher.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Handle one decoded request body and produce its response envelope.
    ///
    /// Never fails: every problem is reported inside the envelope.
    pub async fn handle(&self, payload: Value) -> RpcResponse {
        let timer = CallTimer::new(self.metrics.clone());
        debug!(request = %payload, "<=");

        let response = match payload {
            Value::Object(envelope) => self.handle_envelope(envelope).await,
            _ => {
                warn!("Rejected request: body is not a JSON object");
                RpcResponse::failure(Value::Null, &RpcError::ProtocolVersion)
            }
        };

        if response.is_error() {
            timer.complete_with_error();
        } else {
            timer.complete();
        }

        debug!(response = ?response, "=>");
        response
    }

    /// Check the protocol tag on the raw envelope, then decode the rest.
    ///
    /// Only a bad tag loses the correlation id; any later failure echoes it.
    async fn handle_envelope(&self, envelope: Map<String, Value>) -> RpcResponse {
        let jsonrpc = envelope.get("jsonrpc");
        if jsonrpc.and_then(Value::as_str) != Some(JSONRPC_VERSION) {
            warn!(jsonrpc = ?jsonrpc, "Rejected request: bad protocol version");
            return RpcResponse::failure(Value::Null, &RpcError::ProtocolVersion);
        }

        let raw_id = envelope.get("id").cloned();
        match serde_json::from_value::<RpcRequest>(Value::Object(envelope)) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                let err = RpcError::from(e);
                warn!(code = err.code(), message = %err, "Rejected request: malformed envelope");
                RpcResponse::failure(correlation_id(raw_id), &err)
            }
        }
    }

    async fn handle_request(&self, request: RpcRequest) -> RpcResponse {
        let id = correlation_id(request.id);
        let method = request.method.unwrap_or_default();
        let params = request.params.unwrap_or_default();

        match self.call(&method, params).await {
            Ok(result) => RpcResponse::success(id, result),
            Err(err) => {
                warn!(method = %method, code = err.code(), message = %err, "Call failed");
                RpcResponse::failure(id, &err)
            }
        }
    }

    /// Route one call to the directory and serialize its result.
    pub async fn call(&self, method: &str, params: Params) -> RpcResult<Value> {
        let method: Method = method.parse()?;

        match method {
            Method::AddContact => {
                let p = AddContactParams::from_params(params)?;
                let contact = self
                    .directory
                    .add(&p.name, &p.phone, p.email.as_deref())
                    .await?;
                Ok(serde_json::to_value(contact)?)
            }
            Method::GetByName => {
                let p: GetByNameParams = named(method, params)?;
                let contacts = self.directory.get_by_name(&p.name).await?;
                Ok(serde_json::to_value(contacts)?)
            }
            Method::UpdateContact => {
                let p: UpdateContactParams = named(method, params)?;
                let contact = self
                    .directory
                    .update(&p.id, &p.name, &p.phone, p.email.as_deref())
                    .await?;
                Ok(serde_json::to_value(contact)?)
            }
            Method::DeleteContact => {
                let p: DeleteContactParams = named(method, params)?;
                self.directory.delete(&p.id).await?;
                Ok(Value::Null)
            }
            Method::GetAllContacts => {
                let grouped = self.directory.get_all().await?;
                Ok(serde_json::to_value(grouped)?)
            }
        }
    }
}

impl fmt::Debug for RpcDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcDispatcher")
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}
