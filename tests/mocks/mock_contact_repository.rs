use async_trait::async_trait;
use phonebook_rpc::error::DirectoryResult;
use phonebook_rpc::models::Contact;
use phonebook_rpc::repositories::{ContactRepository, Directory, PhonesByName};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Call-counting contact repository for testing.
///
/// Delegates every operation to a real in-memory `Directory` and tracks how
/// often each method was called, so tests can verify which store operations
/// a dispatched call reached.
#[derive(Clone)]
pub struct MockContactRepository {
    inner: Arc<Directory>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Directory::new()),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Total calls across all methods.
    pub fn total_calls(&self) -> usize {
        self.call_counts.lock().unwrap().values().sum()
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn add(
        &self,
        name: &str,
        phone: &str,
        email: Option<&str>,
    ) -> DirectoryResult<Contact> {
        self.track_call("add");
        self.inner.add(name, phone, email).await
    }

    async fn get_by_name(&self, name: &str) -> DirectoryResult<Vec<Contact>> {
        self.track_call("get_by_name");
        self.inner.get_by_name(name).await
    }

    async fn update(
        &self,
        id: &str,
        name: &str,
        phone: &str,
        email: Option<&str>,
    ) -> DirectoryResult<Contact> {
        self.track_call("update");
        self.inner.update(id, name, phone, email).await
    }

    async fn delete(&self, id: &str) -> DirectoryResult<()> {
        self.track_call("delete");
        self.inner.delete(id).await
    }

    async fn get_all(&self) -> DirectoryResult<PhonesByName> {
        self.track_call("get_all");
        self.inner.get_all().await
    }

    async fn len(&self) -> usize {
        self.inner.len().await
    }
}
