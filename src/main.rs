//! Phonebook RPC - Main entry point
//!
//! Builds the contact directory once, wires it into the JSON-RPC dispatcher,
//! and serves it over HTTP until interrupted.

use anyhow::Result;
use phonebook_rpc::repositories::{ContactRepository, Directory};
use phonebook_rpc::{server, Config, RpcDispatcher};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration before logging so LOG_LEVEL can seed the filter
    let config = Config::from_env();

    let level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let directory = Arc::new(Directory::new()) as Arc<dyn ContactRepository>;
    let dispatcher = Arc::new(RpcDispatcher::new(directory.clone()));
    let app = server::router(dispatcher.clone(), &config.rpc_path);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("Serving JSON-RPC at {}", config.rpc_path);

    server::run_server(listener, app, shutdown_signal()).await?;

    let summary = dispatcher.metrics().summary();
    info!(
        calls = summary.calls_total,
        errors = summary.errors_total,
        avg_us = summary.duration_avg_us,
        contacts = directory.len().await,
        "Phonebook shutdown complete"
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
