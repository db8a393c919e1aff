//! Translation of sqlx errors into repository errors.

use crate::domain::repositories::StoreError;

/// Primary key on `url_mappings.short_id`.
pub const SHORT_ID_CONSTRAINT: &str = "url_mappings_pkey";

/// Unique index on `md5(url_mappings.original_url)`.
pub const ORIGINAL_URL_CONSTRAINT: &str = "url_mappings_original_url_key";

/// Maps a sqlx error to a [`StoreError`], naming the violated unique constraint.
pub fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    let Some(db_err) = e.as_database_error() else {
        return StoreError::Unavailable(e.to_string());
    };

    if !db_err.is_unique_violation() {
        return StoreError::Unavailable(e.to_string());
    }

    match db_err.constraint() {
        Some(SHORT_ID_CONSTRAINT) => StoreError::DuplicateShortId,
        Some(ORIGINAL_URL_CONSTRAINT) => StoreError::DuplicateOriginalUrl,
        _ => StoreError::Unavailable(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_unavailable() {
        let error = map_sqlx_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(error, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_row_not_found_is_unavailable() {
        let error = map_sqlx_error(sqlx::Error::RowNotFound);
        assert!(matches!(error, StoreError::Unavailable(_)));
    }
}
