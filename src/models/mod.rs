//! Data models for the phonebook.

pub mod contact;

pub use contact::{Contact, ContactFields};
