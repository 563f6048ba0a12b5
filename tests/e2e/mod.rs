//! End-to-end test utilities shared by the RPC and HTTP test suites.

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use phonebook_rpc::repositories::{ContactRepository, Directory};
use phonebook_rpc::{server, RpcDispatcher};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub mod fixtures;

/// A dispatcher over a fresh, empty directory.
pub fn setup_dispatcher() -> RpcDispatcher {
    RpcDispatcher::new(Arc::new(Directory::new()) as Arc<dyn ContactRepository>)
}

/// The HTTP router over a fresh, empty directory, serving at `/rpc`.
pub fn setup_router() -> Router {
    server::router(Arc::new(setup_dispatcher()), "/rpc")
}

/// Dispatch one request body and return the response as JSON.
pub async fn call(dispatcher: &RpcDispatcher, request: Value) -> Value {
    let response = dispatcher.handle(request).await;
    serde_json::to_value(response).expect("response serializes")
}

/// POST a raw body to `path` and return the status and decoded JSON body.
///
/// The body is `Value::Null` when the response is not JSON.
pub async fn post_raw(app: &Router, path: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("request builds");

    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// POST a JSON request to `/rpc`.
pub async fn post_rpc(app: &Router, request: Value) -> (StatusCode, Value) {
    post_raw(app, "/rpc", request.to_string()).await
}

/// Assert that a response is an error envelope with the given code.
pub fn assert_error_code(response: &Value, code: i64) {
    assert!(
        response.get("result").is_none(),
        "expected error envelope, got {}",
        response
    );
    assert_eq!(response["error"]["code"], code, "unexpected envelope {}", response);
}

/// Assert that a response is a success envelope and return its result.
pub fn assert_success(response: &Value) -> &Value {
    assert!(
        response.get("error").is_none(),
        "expected success envelope, got {}",
        response
    );
    assert_eq!(response["jsonrpc"], "2.0");
    &response["result"]
}

/// Assert that a value has the wire shape of a contact.
pub fn assert_contact_valid(contact: &Value) {
    assert!(
        contact["id"].as_str().is_some_and(|id| !id.is_empty()),
        "Contact ID should not be empty"
    );
    assert!(contact["name"].is_string(), "Contact name should be a string");
    assert!(contact["phone"].is_string(), "Contact phone should be a string");
    assert!(contact.get("email").is_some(), "Contact email key should be present");
}
