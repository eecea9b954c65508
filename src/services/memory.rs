use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use crate::models::{NewProfileRecord, ProfileChanges, ProfileId, ProfileRecord, ScanField};
use crate::services::store::{ProfileReader, ProfileStore, StoreError};

/// In-process profile store
///
/// Holds records in their persisted form (interests as a serialized scalar)
/// so every read goes through the same decode path as the database store.
/// Email uniqueness is checked under the write lock, which makes it atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryTable>,
}

#[derive(Debug, Default)]
struct MemoryTable {
    rows: BTreeMap<ProfileId, ProfileRecord>,
    last_id: ProfileId,
}

impl MemoryTable {
    fn email_taken(&self, email: &str, exclude_id: Option<ProfileId>) -> bool {
        self.rows
            .values()
            .any(|row| row.email == email && Some(row.id) != exclude_id)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a record in verbatim, keeping its id
    ///
    /// Skips every check, including interests decoding; used to seed fixtures
    /// and to simulate rows written by other tools.
    pub async fn put_raw(&self, record: ProfileRecord) {
        let mut table = self.inner.write().await;
        table.last_id = table.last_id.max(record.id);
        table.rows.insert(record.id, record);
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ProfileReader for MemoryStore {
    async fn get_by_id(&self, id: ProfileId) -> Result<Option<ProfileRecord>, StoreError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn scan_by_equality(
        &self,
        field: ScanField,
        value: &str,
        exclude_id: Option<ProfileId>,
    ) -> Result<Vec<ProfileRecord>, StoreError> {
        let table = self.inner.read().await;
        let rows = table
            .rows
            .values()
            .filter(|row| Some(row.id) != exclude_id)
            .filter(|row| field.value_of(row) == value)
            .cloned()
            .collect();

        Ok(rows)
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn insert(&self, profile: NewProfileRecord) -> Result<ProfileRecord, StoreError> {
        let mut table = self.inner.write().await;
        if table.email_taken(&profile.email, None) {
            return Err(StoreError::DuplicateEmail(profile.email));
        }

        table.last_id += 1;
        let record = ProfileRecord {
            id: table.last_id,
            name: profile.name,
            age: profile.age,
            gender: profile.gender,
            email: profile.email,
            city: profile.city,
            interests: profile.interests,
        };
        table.rows.insert(record.id, record.clone());

        Ok(record)
    }

    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<ProfileRecord>, StoreError> {
        let table = self.inner.read().await;
        let rows = table
            .rows
            .values()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect();

        Ok(rows)
    }

    async fn update(
        &self,
        id: ProfileId,
        changes: ProfileChanges,
    ) -> Result<Option<ProfileRecord>, StoreError> {
        let mut table = self.inner.write().await;
        if !table.rows.contains_key(&id) {
            return Ok(None);
        }
        if let Some(email) = &changes.email {
            if table.email_taken(email, Some(id)) {
                return Err(StoreError::DuplicateEmail(email.clone()));
            }
        }

        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply_to(row);

        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: ProfileId) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
