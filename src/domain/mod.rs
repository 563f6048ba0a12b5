//! Domain value objects and types.
//!
//! This module contains type-safe wrappers for the fields of a contact. These
//! value objects validate at construction time, so a `Contact` holding them can
//! never carry a malformed name, phone number or email address.

pub mod contact_id;
pub mod email;
pub mod errors;
pub mod name;
pub mod phone;

pub use contact_id::ContactId;
pub use email::EmailAddress;
pub use errors::ValidationError;
pub use name::{name_key, ContactName, MAX_NAME_CHARS};
pub use phone::PhoneNumber;
