//! In-memory contact directory.
//!
//! Contacts live in a primary index keyed by id and a secondary index mapping
//! each case-folded name to the ids registered under it. Both indexes sit
//! behind one mutex, and every operation holds it from its first read to its
//! last write, so duplicate checks and index updates can never interleave.
//!
//! Invariants maintained between operations:
//! - every id in the name index exists in the id index, under the key equal to
//!   its contact's case-folded name
//! - no two contacts share both a case-folded name and a phone number
//! - ids are fresh UUIDs and are never reassigned

use crate::domain::{name_key, ContactId, PhoneNumber, ValidationError};
use crate::error::{DirectoryError, DirectoryResult};
use crate::models::{Contact, ContactFields};
use crate::repositories::traits::{ContactRepository, PhonesByName};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct DirectoryState {
    by_id: HashMap<ContactId, Contact>,
    by_name: HashMap<String, HashSet<ContactId>>,
}

impl DirectoryState {
    /// Whether a contact other than `except` already uses `phone` under `key`.
    fn has_conflict(&self, key: &str, phone: &PhoneNumber, except: Option<&ContactId>) -> bool {
        let Some(ids) = self.by_name.get(key) else {
            return false;
        };

        ids.iter()
            .filter(|id| Some(*id) != except)
            .filter_map(|id| self.by_id.get(id))
            .any(|contact| &contact.phone == phone)
    }

    fn index(&mut self, key: String, id: ContactId) {
        self.by_name.entry(key).or_default().insert(id);
    }

    fn unindex(&mut self, key: &str, id: &ContactId) {
        if let Some(ids) = self.by_name.get_mut(key) {
            ids.remove(id);
            if ids.is_empty() {
                self.by_name.remove(key);
            }
        }
    }

    fn insert(&mut self, fields: ContactFields) -> DirectoryResult<Contact> {
        let key = fields.name_key();
        if self.has_conflict(&key, &fields.phone, None) {
            warn!(name = %fields.name, phone = %fields.phone, "AddContact refused: duplicate");
            return Err(DirectoryError::Duplicate);
        }

        let mut id = ContactId::generate();
        while self.by_id.contains_key(&id) {
            id = ContactId::generate();
        }

        let contact = Contact::from_fields(id.clone(), fields);
        self.by_id.insert(id.clone(), contact.clone());
        self.index(key, id);

        info!(
            id = %contact.id,
            name = %contact.name,
            phone = %contact.phone,
            "AddContact"
        );
        Ok(contact)
    }

    /// Replace the contact under `id`.
    ///
    /// An unknown id is reported before any field error, then duplicates.
    fn replace(
        &mut self,
        id: &str,
        fields: Result<ContactFields, ValidationError>,
    ) -> DirectoryResult<Contact> {
        let Some(old) = ContactId::new(id).ok().and_then(|id| self.by_id.get(&id)) else {
            warn!(id = %id, "UpdateContact: id not found");
            return Err(DirectoryError::NotFound { id: id.to_string() });
        };
        let id = old.id.clone();
        let old_key = old.name_key();
        let fields = fields?;

        let new_key = fields.name_key();
        if self.has_conflict(&new_key, &fields.phone, Some(&id)) {
            warn!(
                id = %id,
                name = %fields.name,
                phone = %fields.phone,
                "UpdateContact refused: duplicate"
            );
            return Err(DirectoryError::Duplicate);
        }

        if old_key != new_key {
            self.unindex(&old_key, &id);
            self.index(new_key, id.clone());
        }

        let updated = Contact::from_fields(id.clone(), fields);
        self.by_id.insert(id, updated.clone());

        info!(
            id = %updated.id,
            name = %updated.name,
            phone = %updated.phone,
            "UpdateContact"
        );
        Ok(updated)
    }

    fn remove(&mut self, id: &str) -> DirectoryResult<Contact> {
        let Some(contact) = ContactId::new(id).ok().and_then(|id| self.by_id.remove(&id)) else {
            warn!(id = %id, "DeleteContact: id not found");
            return Err(DirectoryError::NotFound { id: id.to_string() });
        };

        self.unindex(&contact.name_key(), &contact.id);
        info!(id = %contact.id, name = %contact.name, "DeleteContact");
        Ok(contact)
    }

    fn lookup(&self, key: &str) -> Vec<Contact> {
        let mut contacts: Vec<Contact> = self
            .by_name
            .get(key)
            .into_iter()
            .flatten()
            .filter_map(|id| self.by_id.get(id))
            .cloned()
            .collect();
        contacts.sort_by(|a, b| a.phone.as_str().cmp(b.phone.as_str()));
        contacts
    }

    fn phones_by_name(&self) -> PhonesByName {
        let mut grouped = PhonesByName::new();
        for contact in self.by_id.values() {
            grouped
                .entry(contact.name_key())
                .or_default()
                .push(contact.phone.as_str().to_string());
        }
        for phones in grouped.values_mut() {
            phones.sort();
        }
        grouped
    }

    #[cfg(test)]
    fn assert_consistent(&self) {
        let mut indexed = 0;
        for (key, ids) in &self.by_name {
            assert!(!ids.is_empty(), "empty bucket left for {key}");
            for id in ids {
                let contact = self.by_id.get(id).expect("indexed id missing from id index");
                assert_eq!(&contact.name_key(), key);
                indexed += 1;
            }
        }
        assert_eq!(indexed, self.by_id.len(), "every contact is indexed exactly once");

        let mut pairs = HashSet::new();
        for contact in self.by_id.values() {
            assert!(
                pairs.insert((contact.name_key(), contact.phone.clone())),
                "duplicate name/phone pair for {}",
                contact.id
            );
        }
    }
}

/// Process-wide contact store.
///
/// Construct one at startup and share it behind an `Arc`; the directory has no
/// global state of its own.
pub struct Directory {
    state: Mutex<DirectoryState>,
}

impl Directory {
    /// Create an empty directory.
    pub fn new() -> Self {
        info!("Directory initialised (in-memory)");
        Self {
            state: Mutex::new(DirectoryState::default()),
        }
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("Directory");
        match self.state.try_lock() {
            Ok(state) => dbg.field("contacts", &state.by_id.len()),
            Err(_) => dbg.field("contacts", &"<locked>"),
        };
        dbg.finish()
    }
}

#[async_trait]
impl ContactRepository for Directory {
    async fn add(
        &self,
        name: &str,
        phone: &str,
        email: Option<&str>,
    ) -> DirectoryResult<Contact> {
        let fields = ContactFields::parse(name, phone, email)?;
        let mut state = self.state.lock().await;
        state.insert(fields)
    }

    async fn get_by_name(&self, name: &str) -> DirectoryResult<Vec<Contact>> {
        let key = name_key(name);
        let state = self.state.lock().await;
        let contacts = state.lookup(&key);
        debug!(name = %name, count = contacts.len(), "GetByName");
        Ok(contacts)
    }

    async fn update(
        &self,
        id: &str,
        name: &str,
        phone: &str,
        email: Option<&str>,
    ) -> DirectoryResult<Contact> {
        let fields = ContactFields::parse(name, phone, email);
        let mut state = self.state.lock().await;
        state.replace(id, fields)
    }

    async fn delete(&self, id: &str) -> DirectoryResult<()> {
        let mut state = self.state.lock().await;
        state.remove(id).map(|_| ())
    }

    async fn get_all(&self) -> DirectoryResult<PhonesByName> {
        let state = self.state.lock().await;
        let grouped = state.phones_by_name();
        debug!(names = grouped.len(), contacts = state.by_id.len(), "GetAllContacts");
        Ok(grouped)
    }

    async fn len(&self) -> usize {
        self.state.lock().await.by_id.len()
    }
}
