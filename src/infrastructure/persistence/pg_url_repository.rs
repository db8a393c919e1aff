//! PostgreSQL implementation of the URL mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::{StoreError, UrlRepository};
use crate::utils::db_error::map_sqlx_error;

/// Advisory lock key serializing id allocation across connections and instances.
const ALLOCATION_LOCK_KEY: i64 = 0x7368_6f72_7475_726c;

#[derive(sqlx::FromRow)]
struct UrlMappingRow {
    short_id: i64,
    original_url: String,
    created_at: DateTime<Utc>,
}

impl From<UrlMappingRow> for UrlMapping {
    fn from(row: UrlMappingRow) -> Self {
        UrlMapping::new(row.short_id, row.original_url, row.created_at)
    }
}

/// PostgreSQL repository for URL mappings.
///
/// The dedup lookup filters on `md5(original_url)` first so it can use the
/// unique index, then compares the full string. [`UrlRepository::insert_next`]
/// allocates under a transaction-scoped advisory lock, so ids stay gapless
/// and distinct while the unique index settles races on the same URL.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, StoreError> {
        let row = sqlx::query_as::<_, UrlMappingRow>(
            r#"
            SELECT short_id, original_url, created_at
            FROM url_mappings
            WHERE md5(original_url) = md5($1) AND original_url = $1
            "#,
        )
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(UrlMapping::from))
    }

    async fn find_by_short_id(&self, short_id: i64) -> Result<Option<UrlMapping>, StoreError> {
        let row = sqlx::query_as::<_, UrlMappingRow>(
            r#"
            SELECT short_id, original_url, created_at
            FROM url_mappings
            WHERE short_id = $1
            "#,
        )
        .bind(short_id)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(UrlMapping::from))
    }

    async fn find_max_short_id(&self) -> Result<Option<i64>, StoreError> {
        sqlx::query_scalar::<_, Option<i64>>("SELECT MAX(short_id) FROM url_mappings")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)
    }

    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, StoreError> {
        let created_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            INSERT INTO url_mappings (short_id, original_url)
            VALUES ($1, $2)
            RETURNING created_at
            "#,
        )
        .bind(new_mapping.short_id)
        .bind(&new_mapping.original_url)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(new_mapping.into_mapping(created_at))
    }

    async fn insert_next(&self, original_url: &str) -> Result<UrlMapping, StoreError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        // Released on commit or rollback.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(ALLOCATION_LOCK_KEY)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        let row = sqlx::query_as::<_, UrlMappingRow>(
            r#"
            INSERT INTO url_mappings (short_id, original_url)
            SELECT COALESCE(MAX(short_id), 0) + 1, $1
            FROM url_mappings
            RETURNING short_id, original_url, created_at
            "#,
        )
        .bind(original_url)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM url_mappings")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)
    }
}
