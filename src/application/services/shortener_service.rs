//! URL shortening and resolution service.

use std::sync::Arc;
use std::time::Duration;

use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};

use crate::domain::entities::UrlMapping;
use crate::domain::repositories::{StoreError, UrlRepository};
use crate::domain::resolver::HostResolver;
use crate::error::AppError;
use crate::utils::url_validator::{TargetHost, validate_url};

/// Default number of insert attempts per shorten request.
pub const DEFAULT_ALLOCATION_ATTEMPTS: usize = 5;

/// Parses a short id path parameter as a base-10 integer.
///
/// # Errors
///
/// Returns [`AppError::MalformedId`] if `raw` is not an `i64`.
pub fn parse_short_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>().map_err(|_| {
        metrics::counter!("shorturl_resolve_total", "outcome" => "malformed").increment(1);
        AppError::MalformedId(raw.to_string())
    })
}

/// Service for creating and resolving numeric short URLs.
///
/// Every shorten request runs the same pipeline: syntax check, hostname
/// resolution, deduplication by exact URL, then id allocation. Ids are
/// derived from the store (`max + 1`), never from process memory, so the
/// sequence survives restarts and is shared by every instance.
pub struct ShortenerService<R: UrlRepository> {
    repository: Arc<R>,
    resolver: Arc<dyn HostResolver>,
    allocation_attempts: usize,
}

impl<R: UrlRepository> ShortenerService<R> {
    /// Creates a new shortener service.
    pub fn new(repository: Arc<R>, resolver: Arc<dyn HostResolver>) -> Self {
        Self {
            repository,
            resolver,
            allocation_attempts: DEFAULT_ALLOCATION_ATTEMPTS,
        }
    }

    /// Sets how many times an insert is attempted when concurrent writers
    /// take the freshly allocated id. Values below 1 are treated as 1.
    pub fn with_allocation_attempts(mut self, attempts: usize) -> Self {
        self.allocation_attempts = attempts.max(1);
        self
    }

    /// Shortens `raw_url`, or returns the existing mapping for it.
    ///
    /// # Deduplication
    ///
    /// The URL is compared verbatim against stored mappings. Shortening the
    /// same string twice never consumes a second id.
    ///
    /// # Allocation
    ///
    /// The new id is `max(short_id) + 1`, or 1 for an empty store, allocated
    /// atomically by the repository. If the id is nevertheless taken,
    /// allocation is repeated up to the configured number of attempts. If the
    /// insert loses a race for the URL itself, the winning mapping is returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] if:
    /// - the URL is empty, malformed or not `http`/`https`
    /// - the hostname does not resolve in time
    ///
    /// Returns [`AppError::StorageConflict`] when the retry budget is spent
    /// and [`AppError::StorageUnavailable`] on database errors.
    pub async fn shorten(&self, raw_url: &str) -> Result<UrlMapping, AppError> {
        if let Err(e) = self.validate_target(raw_url).await {
            metrics::counter!("shorturl_shorten_total", "outcome" => "rejected").increment(1);
            return Err(e);
        }

        if let Some(existing) = self.repository.find_by_original_url(raw_url).await? {
            debug!(short_id = existing.short_id, "URL already shortened");
            metrics::counter!("shorturl_shorten_total", "outcome" => "existing").increment(1);
            return Ok(existing);
        }

        let mapping = self.insert_with_retry(raw_url).await?;

        info!(
            short_id = mapping.short_id,
            original_url = %mapping.original_url,
            "Created short URL"
        );
        metrics::counter!("shorturl_shorten_total", "outcome" => "created").increment(1);

        Ok(mapping)
    }

    /// Resolves a raw short id path parameter to its original URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MalformedId`] if `raw_id` is not an integer,
    /// [`AppError::NotFound`] if nothing is stored under it and
    /// [`AppError::StorageUnavailable`] on database errors.
    pub async fn resolve(&self, raw_id: &str) -> Result<String, AppError> {
        let short_id = parse_short_id(raw_id)?;
        self.resolve_id(short_id).await
    }

    /// Resolves an already parsed short id to its original URL.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`].
    pub async fn resolve_id(&self, short_id: i64) -> Result<String, AppError> {
        match self.repository.find_by_short_id(short_id).await? {
            Some(mapping) => {
                metrics::counter!("shorturl_resolve_total", "outcome" => "found").increment(1);
                Ok(mapping.original_url)
            }
            None => {
                metrics::counter!("shorturl_resolve_total", "outcome" => "not_found").increment(1);
                Err(AppError::NotFound(short_id))
            }
        }
    }

    /// Returns the number of stored mappings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on database errors.
    pub async fn count(&self) -> Result<i64, AppError> {
        Ok(self.repository.count().await?)
    }

    /// Runs the syntax and reachability checks.
    async fn validate_target(&self, raw_url: &str) -> Result<(), AppError> {
        let host = validate_url(raw_url).map_err(|e| AppError::invalid_url(e.to_string()))?;

        if let TargetHost::Domain(domain) = host {
            self.resolver.resolve(&domain).await?;
        }

        Ok(())
    }

    /// Allocates the next id and inserts, retrying on id collisions.
    async fn insert_with_retry(&self, original_url: &str) -> Result<UrlMapping, AppError> {
        let strategy = ExponentialBackoff::from_millis(2)
            .max_delay(Duration::from_millis(50))
            .map(jitter)
            .take(self.allocation_attempts - 1);

        let outcome = RetryIf::spawn(
            strategy,
            || self.repository.insert_next(original_url),
            |e: &StoreError| {
                let collided = *e == StoreError::DuplicateShortId;
                if collided {
                    warn!("Short id taken by a concurrent writer, reallocating");
                }
                collided
            },
        )
        .await;

        match outcome {
            Ok(mapping) => Ok(mapping),
            Err(StoreError::DuplicateShortId) => Err(AppError::StorageConflict(format!(
                "short id allocation failed after {} attempts",
                self.allocation_attempts
            ))),
            Err(StoreError::DuplicateOriginalUrl) => {
                debug!("URL shortened concurrently, returning the stored mapping");
                self.repository
                    .find_by_original_url(original_url)
                    .await?
                    .ok_or_else(|| {
                        AppError::StorageConflict(
                            "concurrently stored mapping is not readable".to_string(),
                        )
                    })
            }
            Err(e) => Err(e.into()),
        }
    }
}
