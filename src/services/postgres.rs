use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use crate::models::{NewProfileRecord, ProfileChanges, ProfileId, ProfileRecord, ScanField};
use crate::services::store::{ProfileReader, ProfileStore, StoreError};

const PROFILE_COLUMNS: &str = "id, name, age, gender, email, city, interests";

/// PostgreSQL-backed profile store
///
/// Interests live in a TEXT column as a JSON array. The `profiles.email`
/// column carries a UNIQUE constraint, so a racing duplicate insert that got
/// past the service's read-then-write check still fails here.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new store from a connection string and run migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }
}

/// Map a unique violation on `email` to `DuplicateEmail`
fn map_write_error(err: sqlx::Error, email: Option<&str>) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::DuplicateEmail(email.unwrap_or_default().to_string());
        }
    }
    StoreError::SqlxError(err)
}

#[async_trait]
impl ProfileReader for PostgresStore {
    async fn get_by_id(&self, id: ProfileId) -> Result<Option<ProfileRecord>, StoreError> {
        let query = format!("SELECT {} FROM profiles WHERE id = $1", PROFILE_COLUMNS);

        let record = sqlx::query_as::<_, ProfileRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn scan_by_equality(
        &self,
        field: ScanField,
        value: &str,
        exclude_id: Option<ProfileId>,
    ) -> Result<Vec<ProfileRecord>, StoreError> {
        // Column names come from a closed enum, never from the caller
        let query = format!(
            r#"
            SELECT {}
            FROM profiles
            WHERE {} = $1
              AND ($2::BIGINT IS NULL OR id <> $2)
            ORDER BY id
            "#,
            PROFILE_COLUMNS,
            field.column()
        );

        let records = sqlx::query_as::<_, ProfileRecord>(&query)
            .bind(value)
            .bind(exclude_id)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(
            "Scan {} = {:?} (excluding {:?}) returned {} rows",
            field.column(),
            value,
            exclude_id,
            records.len()
        );

        Ok(records)
    }
}

#[async_trait]
impl ProfileStore for PostgresStore {
    async fn insert(&self, profile: NewProfileRecord) -> Result<ProfileRecord, StoreError> {
        let query = format!(
            r#"
            INSERT INTO profiles (name, age, gender, email, city, interests)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );

        sqlx::query_as::<_, ProfileRecord>(&query)
            .bind(&profile.name)
            .bind(profile.age)
            .bind(&profile.gender)
            .bind(&profile.email)
            .bind(&profile.city)
            .bind(&profile.interests)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, Some(&profile.email)))
    }

    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<ProfileRecord>, StoreError> {
        let query = format!(
            "SELECT {} FROM profiles ORDER BY id LIMIT $1 OFFSET $2",
            PROFILE_COLUMNS
        );

        let records = sqlx::query_as::<_, ProfileRecord>(&query)
            .bind(i64::from(limit))
            .bind(i64::from(skip))
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn update(
        &self,
        id: ProfileId,
        changes: ProfileChanges,
    ) -> Result<Option<ProfileRecord>, StoreError> {
        let query = format!(
            r#"
            UPDATE profiles SET
                name = COALESCE($2, name),
                age = COALESCE($3, age),
                gender = COALESCE($4, gender),
                email = COALESCE($5, email),
                city = COALESCE($6, city),
                interests = COALESCE($7, interests),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );

        sqlx::query_as::<_, ProfileRecord>(&query)
            .bind(id)
            .bind(&changes.name)
            .bind(changes.age)
            .bind(&changes.gender)
            .bind(&changes.email)
            .bind(&changes.city)
            .bind(&changes.interests)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, changes.email.as_deref()))
    }

    async fn delete(&self, id: ProfileId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_constraint_errors_pass_through() {
        let err = map_write_error(sqlx::Error::RowNotFound, Some("a@example.com"));
        assert!(matches!(err, StoreError::SqlxError(sqlx::Error::RowNotFound)));
    }
}
