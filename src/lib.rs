//! Phonebook RPC - an in-memory contact directory served over JSON-RPC 2.0.
//!
//! # Architecture
//!
//! - **domain**: Validated value objects for contact fields
//! - **models**: The `Contact` value
//! - **repositories**: The concurrent in-memory directory and its trait
//! - **server**: JSON-RPC envelopes, the call dispatcher, and the HTTP route
//! - **error**: Error taxonomy and wire error codes
//! - **config**: Configuration from environment variables
//! - **metrics**: Call counters for the dispatcher

pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;

pub use config::Config;
pub use error::{ConfigError, DirectoryError, RpcError};
pub use metrics::{CallTimer, Metrics, MetricsSummary};
pub use models::{Contact, ContactFields};
pub use repositories::{ContactRepository, Directory, PhonesByName};
pub use server::{RpcDispatcher, RpcResponse};
