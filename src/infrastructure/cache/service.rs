//! Cache service trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching resolved short ids.
///
/// Mappings never change once stored, so a cached destination stays valid
/// for as long as the entry lives. Implementations must degrade to cache
/// misses rather than fail the redirect.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the original URL for a short id.
    ///
    /// Returns `Ok(None)` on a miss.
    async fn get_url(&self, short_id: i64) -> CacheResult<Option<String>>;

    /// Stores a resolved destination with an optional TTL in seconds
    /// (implementation default when `None`).
    async fn set_url(
        &self,
        short_id: i64,
        original_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Backend name reported by the health endpoint.
    fn backend(&self) -> &'static str;
}
