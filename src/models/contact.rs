//! Contact model representing a single phonebook entry.

use crate::domain::{ContactId, ContactName, EmailAddress, PhoneNumber, ValidationError};
use serde::{Deserialize, Serialize};

/// The validated, id-less fields of a contact.
///
/// Produced before the directory lock is taken so that malformed input is
/// rejected without touching shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFields {
    pub name: ContactName,
    pub phone: PhoneNumber,
    pub email: Option<EmailAddress>,
}

impl ContactFields {
    /// Validate raw field values.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` encountered, checking name, phone and
    /// email in that order.
    pub fn parse(name: &str, phone: &str, email: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: ContactName::new(name)?,
            phone: PhoneNumber::new(phone)?,
            email: email.map(EmailAddress::new).transpose()?,
        })
    }

    /// Case-folded name used as the secondary index key.
    pub fn name_key(&self) -> String {
        self.name.key()
    }
}

/// A contact in the directory.
///
/// Contacts are immutable values; an update replaces the stored contact with a
/// new one carrying the same id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    /// Unique identifier, assigned when the contact is added
    pub id: ContactId,

    /// Display name (lookups ignore case)
    pub name: ContactName,

    /// Phone number in `+<digits>` form
    pub phone: PhoneNumber,

    /// Optional email address, serialized as `null` when absent
    #[serde(default)]
    pub email: Option<EmailAddress>,
}

impl Contact {
    /// Build a contact from validated fields and an id.
    pub fn from_fields(id: ContactId, fields: ContactFields) -> Self {
        Self {
            id,
            name: fields.name,
            phone: fields.phone,
            email: fields.email,
        }
    }

    /// Validate raw values and build a contact with the given id.
    pub fn new(
        id: ContactId,
        name: &str,
        phone: &str,
        email: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::from_fields(id, ContactFields::parse(name, phone, email)?))
    }

    /// Case-folded name used as the secondary index key.
    pub fn name_key(&self) -> String {
        self.name.key()
    }
}
