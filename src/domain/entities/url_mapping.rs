//! URL mapping entity.

use chrono::{DateTime, Utc};

/// A stored mapping between a numeric short id and the original URL.
///
/// Mappings are created once and never mutated. `original_url` holds the
/// exact string the caller submitted; deduplication compares it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub short_id: i64,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(short_id: i64, original_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            short_id,
            original_url,
            created_at,
        }
    }
}

/// Input data for persisting a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlMapping {
    pub short_id: i64,
    pub original_url: String,
}

impl NewUrlMapping {
    pub fn new(short_id: i64, original_url: impl Into<String>) -> Self {
        Self {
            short_id,
            original_url: original_url.into(),
        }
    }

    /// Materializes the stored record once the database has assigned `created_at`.
    pub fn into_mapping(self, created_at: DateTime<Utc>) -> UrlMapping {
        UrlMapping::new(self.short_id, self.original_url, created_at)
    }
}
