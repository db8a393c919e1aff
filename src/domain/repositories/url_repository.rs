//! Repository trait for URL mapping persistence.

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a [`UrlRepository`].
///
/// The two duplicate variants let the service tell an allocation race
/// (retry with a fresh id) from a concurrent shorten of the same URL
/// (re-read the winner).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("short id already taken")]
    DuplicateShortId,

    #[error("original url already stored")]
    DuplicateOriginalUrl,

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Persistence interface for URL mappings.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Finds a mapping by exact original URL match.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on database errors.
    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, StoreError>;

    /// Finds a mapping by its short id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on database errors.
    async fn find_by_short_id(&self, short_id: i64) -> Result<Option<UrlMapping>, StoreError>;

    /// Returns the largest stored short id, or `None` for an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on database errors.
    async fn find_max_short_id(&self) -> Result<Option<i64>, StoreError>;

    /// Persists a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateShortId`] if the id is taken,
    /// [`StoreError::DuplicateOriginalUrl`] if the URL is already stored and
    /// [`StoreError::Unavailable`] on other database errors.
    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, StoreError>;

    /// Stores `original_url` under the next free id (`max + 1`, or 1 for an
    /// empty store). Reading the maximum and inserting happen as one atomic
    /// step, so concurrent callers receive distinct ids.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateOriginalUrl`] if the URL is already stored,
    /// [`StoreError::DuplicateShortId`] if a writer bypassing the allocation
    /// took the id, and [`StoreError::Unavailable`] on other database errors.
    async fn insert_next(&self, original_url: &str) -> Result<UrlMapping, StoreError>;

    /// Counts stored mappings.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on database errors.
    async fn count(&self) -> Result<i64, StoreError>;
}
