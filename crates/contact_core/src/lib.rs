//! Authoritative contact cache and all network-synchronized mutations.
//!
//! The store never patches the cache after a write. Every mutation is an
//! explicit request to the contact API followed by a caller-driven
//! [`ContactStore::fetch_all`], so the cache and the server can never
//! silently diverge: the only way cache contents change is a successful
//! full re-fetch replacing the previous snapshot wholesale.

use std::collections::BTreeMap;

use reqwest::Client;
use shared::{
    domain::{Contact, ContactField, ContactId},
    protocol::{ContactDraft, ContactRecord},
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

pub mod error;
pub use error::StoreError;

pub struct ContactStore {
    http: Client,
    server_url: String,
    cache: RwLock<Vec<Contact>>,
}

impl ContactStore {
    pub fn new(server_url: impl Into<String>) -> Self {
        let server_url = server_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            server_url,
            cache: RwLock::new(Vec::new()),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/contacts/", self.server_url)
    }

    fn contact_url(&self, id: ContactId) -> String {
        format!("{}/api/contacts/{}", self.server_url, id)
    }

    /// Retrieve the full contact collection and replace the cache.
    ///
    /// The response body is parsed completely, and every record's tag string
    /// split, before the cache is touched; a failed or partially-read fetch
    /// leaves the previous snapshot intact, and concurrent readers during an
    /// in-flight fetch always observe a consistent snapshot.
    pub async fn fetch_all(&self) -> Result<Vec<Contact>, StoreError> {
        let response = self.http.get(self.collection_url()).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "contact list fetch rejected by server");
            return Err(StoreError::Status(status));
        }

        let records: Vec<ContactRecord> = response.json().await?;
        let contacts: Vec<Contact> = records.into_iter().map(Contact::from).collect();
        debug!(count = contacts.len(), "contact cache replaced");

        let mut cache = self.cache.write().await;
        *cache = contacts.clone();
        Ok(contacts)
    }

    /// Create a contact from the submitted form values.
    ///
    /// Does not touch the cache: the new contact becomes visible only
    /// through a subsequent [`fetch_all`](Self::fetch_all). Explicit re-sync
    /// over optimistic update, trading latency for consistency.
    pub async fn create(&self, draft: &ContactDraft) -> Result<(), StoreError> {
        let response = self
            .http
            .post(self.collection_url())
            .form(draft)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "contact create rejected by server");
            return Err(StoreError::Status(status));
        }
        info!(full_name = %draft.full_name, "contact created");
        Ok(())
    }

    /// Diff-based partial update: transmit only the scalar fields whose
    /// submitted value differs from the cached record, plus the tag string
    /// wholesale.
    ///
    /// An `id` with no cached record is a precondition violation and fails
    /// with [`StoreError::UnknownContact`] before any network traffic; it
    /// must never degrade into an empty diff.
    pub async fn update(&self, id: ContactId, draft: &ContactDraft) -> Result<(), StoreError> {
        let previous = self
            .find_by_id(id)
            .await
            .ok_or(StoreError::UnknownContact(id))?;
        let changed = diff_fields(&previous, draft);

        let response = self
            .http
            .put(self.contact_url(id))
            .form(&changed)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, %id, "contact update rejected by server");
            return Err(StoreError::Status(status));
        }
        info!(%id, fields = changed.len(), "contact updated");
        Ok(())
    }

    /// Delete a contact. The cache is untouched; re-fetch is the only
    /// reconciliation path.
    pub async fn delete(&self, id: ContactId) -> Result<(), StoreError> {
        let response = self.http.delete(self.contact_url(id)).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, %id, "contact delete rejected by server");
            return Err(StoreError::Status(status));
        }
        info!(%id, "contact deleted");
        Ok(())
    }

    /// Clone of the current cache snapshot.
    pub async fn snapshot(&self) -> Vec<Contact> {
        self.cache.read().await.clone()
    }

    pub async fn find_by_id(&self, id: ContactId) -> Option<Contact> {
        self.cache
            .read()
            .await
            .iter()
            .find(|contact| contact.id == id)
            .cloned()
    }

    pub async fn filter_by_prefix(&self, query: &str) -> Vec<Contact> {
        filter_by_prefix(&self.cache.read().await, query)
    }

    pub async fn filter_by_tag(&self, tag: &str) -> Vec<Contact> {
        filter_by_tag(&self.cache.read().await, tag)
    }
}

/// The field subset an update transmits: every scalar field whose submitted
/// value differs from the cached one, plus `tags` always. The UI cannot
/// cheaply diff a tag sequence against a comma string, so tags travel
/// wholesale.
pub fn diff_fields(previous: &Contact, draft: &ContactDraft) -> BTreeMap<&'static str, String> {
    let mut changed = BTreeMap::new();
    for field in ContactField::ALL {
        let submitted = match field {
            ContactField::FullName => &draft.full_name,
            ContactField::PhoneNumber => &draft.phone_number,
            ContactField::Email => &draft.email,
        };
        if previous.field(field) != submitted {
            changed.insert(field.wire_name(), submitted.clone());
        }
    }
    changed.insert("tags", draft.tags.clone());
    changed
}

/// Case-insensitive prefix match against `full_name`. The empty query
/// matches the whole input, never "no results".
pub fn filter_by_prefix(contacts: &[Contact], query: &str) -> Vec<Contact> {
    let needle = query.to_lowercase();
    contacts
        .iter()
        .filter(|contact| contact.full_name.to_lowercase().starts_with(&needle))
        .cloned()
        .collect()
}

/// Exact membership test against each contact's tag sequence. Contacts with
/// no tags never match any tag filter.
pub fn filter_by_tag(contacts: &[Contact], tag: &str) -> Vec<Contact> {
    contacts
        .iter()
        .filter(|contact| contact.has_tag(tag))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
