use std::sync::Arc;
use thiserror::Error;
use crate::core::interests::{encode, InterestsError};
use crate::models::{
    CreateProfileRequest, NewProfileRecord, Profile, ProfileChanges, ProfileId, ProfileRecord,
    ScanField, UpdateProfileRequest,
};
use crate::services::store::{ProfileReader, ProfileStore, StoreError};

/// Errors from the profile CRUD operations
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("User not found: {0}")]
    NotFound(ProfileId),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Stored interests for user {id} are malformed: {source}")]
    MalformedInterests {
        id: ProfileId,
        #[source]
        source: InterestsError,
    },

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for ProfileError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(email) => ProfileError::DuplicateEmail(email),
            other => ProfileError::Store(other),
        }
    }
}

fn decode_record(record: ProfileRecord) -> Result<Profile, ProfileError> {
    let id = record.id;
    record
        .into_profile()
        .map_err(|source| ProfileError::MalformedInterests { id, source })
}

/// CRUD operations over the profile store
///
/// Interests are encoded on the way in and decoded on the way out; callers
/// only ever see the set form.
#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
    max_page_size: u32,
}

impl ProfileService {
    pub fn new(store: Arc<dyn ProfileStore>, max_page_size: u32) -> Self {
        Self {
            store,
            max_page_size: max_page_size.max(1),
        }
    }

    pub fn store(&self) -> &Arc<dyn ProfileStore> {
        &self.store
    }

    /// Best-effort duplicate check
    ///
    /// Two concurrent requests can both pass it; the store's own uniqueness
    /// enforcement is what actually guarantees a single owner per email.
    async fn ensure_email_free(
        &self,
        email: &str,
        exclude_id: Option<ProfileId>,
    ) -> Result<(), ProfileError> {
        let existing = self
            .store
            .scan_by_equality(ScanField::Email, email, exclude_id)
            .await?;

        if existing.is_empty() {
            Ok(())
        } else {
            Err(ProfileError::DuplicateEmail(email.to_string()))
        }
    }

    pub async fn create(&self, req: CreateProfileRequest) -> Result<Profile, ProfileError> {
        self.ensure_email_free(&req.email, None).await?;

        let record = self
            .store
            .insert(NewProfileRecord {
                interests: encode(&req.interests),
                name: req.name,
                age: req.age,
                gender: req.gender,
                email: req.email,
                city: req.city,
            })
            .await?;

        tracing::info!("Created profile {}", record.id);
        decode_record(record)
    }

    pub async fn get(&self, id: ProfileId) -> Result<Profile, ProfileError> {
        let record = self
            .store
            .get_by_id(id)
            .await?
            .ok_or(ProfileError::NotFound(id))?;

        decode_record(record)
    }

    /// A page of profiles; `limit` is capped at the configured maximum
    pub async fn list(&self, skip: u32, limit: u32) -> Result<Vec<Profile>, ProfileError> {
        let limit = limit.min(self.max_page_size);
        let records = self.store.list(skip, limit).await?;

        records.into_iter().map(decode_record).collect()
    }

    /// Partial update: only the supplied fields change
    pub async fn update(
        &self,
        id: ProfileId,
        req: UpdateProfileRequest,
    ) -> Result<Profile, ProfileError> {
        let existing = self
            .store
            .get_by_id(id)
            .await?
            .ok_or(ProfileError::NotFound(id))?;

        if let Some(email) = &req.email {
            self.ensure_email_free(email, Some(id)).await?;
        }

        let changes = ProfileChanges {
            interests: req.interests.as_ref().map(encode),
            name: req.name,
            age: req.age,
            gender: req.gender,
            email: req.email,
            city: req.city,
        };

        // The row can still vanish between the lookup and the write
        let record = if changes.is_empty() {
            existing
        } else {
            self.store
                .update(id, changes)
                .await?
                .ok_or(ProfileError::NotFound(id))?
        };

        tracing::info!("Updated profile {}", id);
        decode_record(record)
    }

    pub async fn delete(&self, id: ProfileId) -> Result<(), ProfileError> {
        if !self.store.delete(id).await? {
            return Err(ProfileError::NotFound(id));
        }

        tracing::info!("Deleted profile {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::interests::Interests;
    use crate::services::MemoryStore;

    fn service() -> ProfileService {
        ProfileService::new(Arc::new(MemoryStore::new()), 100)
    }

    fn create_request(email: &str, city: &str, interests: &[&str]) -> CreateProfileRequest {
        CreateProfileRequest {
            name: "Test".to_string(),
            age: 28,
            gender: "male".to_string(),
            email: email.to_string(),
            city: city.to_string(),
            interests: interests.iter().copied().collect(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = service();
        let created = service
            .create(create_request("a@example.com", "Austin", &["chess", "chess"]))
            .await
            .unwrap();

        let fetched = service.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.interests.len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let service = service();
        service
            .create(create_request("a@example.com", "Austin", &["chess"]))
            .await
            .unwrap();

        let err = service
            .create(create_request("a@example.com", "Dallas", &["art"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ProfileError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn test_update_is_partial() {
        let service = service();
        let created = service
            .create(create_request("a@example.com", "Austin", &["chess"]))
            .await
            .unwrap();

        let updated = service
            .update(
                created.id,
                UpdateProfileRequest {
                    interests: Some(["hiking", "art"].into_iter().collect()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let expected: Interests = ["art", "hiking"].into_iter().collect();
        assert_eq!(updated.interests, expected);
        assert_eq!(updated.city, "Austin");
        assert_eq!(updated.email, "a@example.com");
        assert_eq!(updated.id, created.id);
    }

    #[tokio::test]
    async fn test_update_rejects_taken_email() {
        let service = service();
        let a = service
            .create(create_request("a@example.com", "Austin", &[]))
            .await
            .unwrap();
        service
            .create(create_request("b@example.com", "Austin", &[]))
            .await
            .unwrap();

        let err = service
            .update(
                a.id,
                UpdateProfileRequest {
                    email: Some("b@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProfileError::DuplicateEmail(_)));

        // Re-submitting one's own email is not a conflict
        let same = service
            .update(
                a.id,
                UpdateProfileRequest {
                    email: Some("a@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(same.is_ok());
    }

    #[tokio::test]
    async fn test_update_missing_with_taken_email_is_not_found() {
        let service = service();
        service
            .create(create_request("a@example.com", "Austin", &["chess"]))
            .await
            .unwrap();

        let err = service
            .update(
                999,
                UpdateProfileRequest {
                    email: Some("a@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProfileError::NotFound(999)));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let service = service();

        let err = service
            .update(42, UpdateProfileRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProfileError::NotFound(42)));

        let err = service.delete(42).await.unwrap_err();
        assert!(matches!(err, ProfileError::NotFound(42)));
    }

    #[tokio::test]
    async fn test_list_caps_limit() {
        let service = ProfileService::new(Arc::new(MemoryStore::new()), 2);
        for i in 0..4 {
            service
                .create(create_request(&format!("{}@example.com", i), "Austin", &[]))
                .await
                .unwrap();
        }

        let page = service.list(0, 50).await.unwrap();
        assert_eq!(page.len(), 2);
    }

    #[tokio::test]
    async fn test_list_surfaces_corrupt_rows() {
        let store = Arc::new(MemoryStore::new());
        store
            .put_raw(ProfileRecord {
                id: 1,
                name: "Broken".to_string(),
                age: 40,
                gender: "other".to_string(),
                email: "broken@example.com".to_string(),
                city: "Austin".to_string(),
                interests: "not json".to_string(),
            })
            .await;
        let service = ProfileService::new(store, 10);

        let err = service.list(0, 10).await.unwrap_err();
        assert!(matches!(err, ProfileError::MalformedInterests { id: 1, .. }));
    }
}
