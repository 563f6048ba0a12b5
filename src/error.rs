//! Error types for the phonebook service.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::ValidationError;
use thiserror::Error;

/// JSON-RPC error code for a request that is not a valid envelope.
pub const INVALID_REQUEST: i64 = -32600;

/// JSON-RPC error code for a method that is not routed.
pub const METHOD_NOT_FOUND: i64 = -32601;

/// JSON-RPC error code for bad, duplicate or unknown-id parameters.
pub const INVALID_PARAMS: i64 = -32602;

/// Server-defined code for failures outside the taxonomy.
pub const SERVER_ERROR: i64 = -32000;

/// Errors raised by the contact directory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// A contact field is malformed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Another contact already has the same name (ignoring case) and phone
    #[error("Contact already exists")]
    Duplicate,

    /// No contact has the given id
    #[error("Contact not found")]
    NotFound { id: String },
}

/// Every failure the dispatcher can report to a caller.
///
/// Each variant maps to exactly one wire code through [`RpcError::code`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RpcError {
    /// A contact field is malformed
    #[error("{0}")]
    Validation(ValidationError),

    /// Uniqueness violation on add or update
    #[error("Contact already exists")]
    Duplicate,

    /// Unknown contact id on update or delete
    #[error("Not found")]
    NotFound,

    /// The envelope's `jsonrpc` tag is missing or not "2.0"
    #[error("Invalid JSON-RPC version")]
    ProtocolVersion,

    /// The method name is not in the routing table
    #[error("Unknown method '{0}'")]
    MethodNotFound(String),

    /// Anything else, including malformed parameters
    #[error("{0}")]
    Unclassified(String),
}

impl RpcError {
    /// Wire error code for this failure.
    pub fn code(&self) -> i64 {
        match self {
            RpcError::Validation(_) | RpcError::Duplicate | RpcError::NotFound => INVALID_PARAMS,
            RpcError::ProtocolVersion => INVALID_REQUEST,
            RpcError::MethodNotFound(_) => METHOD_NOT_FOUND,
            RpcError::Unclassified(_) => SERVER_ERROR,
        }
    }
}

impl From<DirectoryError> for RpcError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Validation(e) => RpcError::Validation(e),
            DirectoryError::Duplicate => RpcError::Duplicate,
            DirectoryError::NotFound { .. } => RpcError::NotFound,
        }
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(err: serde_json::Error) -> Self {
        RpcError::Unclassified(err.to_string())
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with DirectoryError
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Convenience type alias for Results with RpcError
pub type RpcResult<T> = Result<T, RpcError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
