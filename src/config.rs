//! Configuration management for the phonebook service.
//!
//! Settings come from environment variables, optionally seeded from a `.env`
//! file in the working directory.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::net::SocketAddr;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Default path of the JSON-RPC endpoint.
pub const DEFAULT_RPC_PATH: &str = "/rpc";

/// Configuration for the phonebook service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to (default: 127.0.0.1:5000)
    pub bind_addr: SocketAddr,

    /// Route serving JSON-RPC calls (default: "/rpc")
    pub rpc_path: String,

    /// Log level used when `RUST_LOG` is unset (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `PHONEBOOK_BIND_ADDR`: socket address to listen on
    /// - `PHONEBOOK_RPC_PATH`: route for JSON-RPC calls, must start with '/'
    /// - `LOG_LEVEL`: logging level
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let bind_addr = match env::var("PHONEBOOK_BIND_ADDR") {
            Ok(val) => val
                .parse::<SocketAddr>()
                .map_err(|_| ConfigError::InvalidValue {
                    var: "PHONEBOOK_BIND_ADDR".to_string(),
                    reason: format!("Must be a socket address like 127.0.0.1:5000, got: {}", val),
                })?,
            Err(_) => Self::default().bind_addr,
        };

        let rpc_path = env::var("PHONEBOOK_RPC_PATH").unwrap_or_else(|_| DEFAULT_RPC_PATH.to_string());
        if !rpc_path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                var: "PHONEBOOK_RPC_PATH".to_string(),
                reason: "Must start with '/'".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        if log_level.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "LOG_LEVEL".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        Ok(Config {
            bind_addr,
            rpc_path,
            log_level,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            rpc_path: DEFAULT_RPC_PATH.to_string(),
            log_level: "info".to_string(),
        }
    }
}
