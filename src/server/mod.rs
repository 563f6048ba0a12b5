//! JSON-RPC server for the phonebook.
//!
//! This module hosts the [`RpcDispatcher`] behind a single HTTP POST route.
//! Every decoded call gets a 200 response whose body says whether it
//! succeeded; only bodies that are not JSON at all are rejected by the
//! transport itself.

pub mod envelope;
pub mod handlers;

pub use envelope::{ErrorObject, Outcome, Params, RpcRequest, RpcResponse, JSONRPC_VERSION};
pub use handlers::{Method, RpcDispatcher};

use anyhow::Result;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Build the HTTP router serving JSON-RPC at `rpc_path`.
pub fn router(dispatcher: Arc<RpcDispatcher>, rpc_path: &str) -> Router {
    Router::new()
        .route(rpc_path, post(rpc_entrypoint))
        .layer(middleware::from_fn(log_requests))
        .with_state(dispatcher)
}

async fn rpc_entrypoint(
    State(dispatcher): State<Arc<RpcDispatcher>>,
    Json(payload): Json<Value>,
) -> Json<RpcResponse> {
    Json(dispatcher.handle(payload).await)
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    info!(target: "http", "HTTP {} {}", method, path);

    let response = next.run(request).await;

    info!(target: "http", "HTTP {} -> {}", method, response.status().as_u16());
    response
}

/// Serve `app` on `listener` until `shutdown` resolves.
pub async fn run_server<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
