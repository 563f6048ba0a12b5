//! Domain validation errors.

use thiserror::Error;

/// Errors that can occur during domain value object validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided ID is empty.
    #[error("ID cannot be empty")]
    EmptyId,

    /// The provided name is empty.
    #[error("Name cannot be empty")]
    EmptyName,

    /// The provided name exceeds the character limit.
    #[error("Name must be at most {max} characters, got {len}")]
    NameTooLong { len: usize, max: usize },

    /// The provided email address is invalid.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// The provided phone number is invalid.
    #[error("Invalid phone number: {0} (expected '+' followed by 7-15 digits)")]
    InvalidPhone(String),
}
