use async_trait::async_trait;
use thiserror::Error;
use crate::models::{NewProfileRecord, ProfileChanges, ProfileId, ProfileRecord, ScanField};

/// Errors that can occur when talking to a profile store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// Read-only view of the profile store
///
/// The matching engine depends on nothing else. Implementations return
/// records in ascending id order.
#[async_trait]
pub trait ProfileReader: Send + Sync {
    /// Point lookup of a live profile
    async fn get_by_id(&self, id: ProfileId) -> Result<Option<ProfileRecord>, StoreError>;

    /// All live profiles whose `field` equals `value`, minus `exclude_id`
    async fn scan_by_equality(
        &self,
        field: ScanField,
        value: &str,
        exclude_id: Option<ProfileId>,
    ) -> Result<Vec<ProfileRecord>, StoreError>;
}

/// Full record store used by the profile CRUD service
#[async_trait]
pub trait ProfileStore: ProfileReader {
    /// Insert a profile and return it with its assigned id
    ///
    /// Fails with `DuplicateEmail` when the store itself can see the conflict.
    async fn insert(&self, profile: NewProfileRecord) -> Result<ProfileRecord, StoreError>;

    /// A page of profiles in id order
    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<ProfileRecord>, StoreError>;

    /// Apply a partial update, returning the new row or `None` if missing
    async fn update(
        &self,
        id: ProfileId,
        changes: ProfileChanges,
    ) -> Result<Option<ProfileRecord>, StoreError>;

    /// Delete a profile, returning whether a row was removed
    async fn delete(&self, id: ProfileId) -> Result<bool, StoreError>;

    /// Health check for the backing storage
    async fn health_check(&self) -> Result<bool, StoreError>;
}
