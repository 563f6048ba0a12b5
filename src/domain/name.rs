//! ContactName value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Maximum name length, counted in characters.
pub const MAX_NAME_CHARS: usize = 100;

/// A validated contact name.
///
/// The original casing is preserved for display; [`ContactName::key`] gives
/// the case-folded form used for lookups and duplicate detection.
///
/// # Example
///
/// ```
/// use phonebook_rpc::domain::ContactName;
///
/// let name = ContactName::new("Alice").unwrap();
/// assert_eq!(name.as_str(), "Alice");
/// assert_eq!(name.key(), "alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContactName(String);

impl ContactName {
    /// Create a new ContactName.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyName` for empty input and
    /// `ValidationError::NameTooLong` above [`MAX_NAME_CHARS`] characters.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();

        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let len = name.chars().count();
        if len > MAX_NAME_CHARS {
            return Err(ValidationError::NameTooLong {
                len,
                max: MAX_NAME_CHARS,
            });
        }

        Ok(Self(name))
    }

    /// Case-folded lookup key for this name.
    pub fn key(&self) -> String {
        name_key(&self.0)
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Case-fold an arbitrary (possibly unvalidated) name into an index key.
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

impl Serialize for ContactName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ContactName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ContactName::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ContactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
