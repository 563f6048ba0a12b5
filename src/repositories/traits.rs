use crate::error::DirectoryResult;
use crate::models::Contact;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Snapshot of the directory grouped by case-folded name.
pub type PhonesByName = BTreeMap<String, Vec<String>>;

/// Repository for managing contacts.
///
/// Every operation is atomic with respect to every other operation on the
/// same repository: a failed call leaves the repository unchanged.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Validate and store a new contact, assigning it a fresh id.
    async fn add(&self, name: &str, phone: &str, email: Option<&str>)
        -> DirectoryResult<Contact>;

    /// All contacts whose name equals `name`, ignoring case.
    async fn get_by_name(&self, name: &str) -> DirectoryResult<Vec<Contact>>;

    /// Replace the contact stored under `id`.
    async fn update(
        &self,
        id: &str,
        name: &str,
        phone: &str,
        email: Option<&str>,
    ) -> DirectoryResult<Contact>;

    /// Remove the contact stored under `id`.
    async fn delete(&self, id: &str) -> DirectoryResult<()>;

    /// Every phone number, grouped by case-folded contact name.
    async fn get_all(&self) -> DirectoryResult<PhonesByName>;

    /// Number of live contacts.
    async fn len(&self) -> usize;

    /// Whether the repository holds no contacts.
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
