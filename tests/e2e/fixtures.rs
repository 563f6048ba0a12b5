//! Request fixtures for end-to-end tests.
//!
//! Builders for JSON-RPC request bodies, so tests read as the calls they make.

use serde_json::{json, Value};

/// A well-formed JSON-RPC 2.0 request.
pub fn rpc_request(method: &str, params: Value, id: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        "id": id,
    })
}

/// `AddContact` with named params and no email.
pub fn add_contact(name: &str, phone: &str, id: i64) -> Value {
    rpc_request("AddContact", json!({"name": name, "phone": phone}), json!(id))
}

/// `GetByName` for one name.
pub fn get_by_name(name: &str, id: i64) -> Value {
    rpc_request("GetByName", json!({"name": name}), json!(id))
}

/// `UpdateContact` with named params and no email.
pub fn update_contact(contact_id: &str, name: &str, phone: &str, id: i64) -> Value {
    rpc_request(
        "UpdateContact",
        json!({"id": contact_id, "name": name, "phone": phone}),
        json!(id),
    )
}

/// `DeleteContact` for one contact id.
pub fn delete_contact(contact_id: &str, id: i64) -> Value {
    rpc_request("DeleteContact", json!({"id": contact_id}), json!(id))
}
