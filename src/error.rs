//! Service error type and its HTTP representation.
//!
//! Client-input errors are reported in-body with HTTP 200, the way the
//! public `/api/shorturl` contract has always behaved. Storage faults map
//! to HTTP 500 with a generic message; the detail only reaches the logs.

use axum::{
    Json,
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::repositories::StoreError;
use crate::domain::resolver::ResolveError;

pub const INVALID_URL_MESSAGE: &str = "invalid url";
pub const MALFORMED_ID_MESSAGE: &str = "Wrong format";
pub const NOT_FOUND_MESSAGE: &str = "No short URL found for given input";
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Error body shared by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Bad syntax, unsupported scheme or unresolvable host.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Path parameter is not a base-10 integer.
    #[error("malformed short id: {0:?}")]
    MalformedId(String),

    /// Well-formed id with no stored mapping.
    #[error("no mapping for short id {0}")]
    NotFound(i64),

    /// Identifier allocation kept colliding with concurrent writers.
    #[error("storage conflict: {0}")]
    StorageConflict(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl AppError {
    pub fn invalid_url(reason: impl Into<String>) -> Self {
        Self::InvalidUrl(reason.into())
    }

    /// Returns true for errors caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl(_) | Self::MalformedId(_) | Self::NotFound(_)
        )
    }

    /// Message exposed to HTTP clients.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => INVALID_URL_MESSAGE,
            Self::MalformedId(_) => MALFORMED_ID_MESSAGE,
            Self::NotFound(_) => NOT_FOUND_MESSAGE,
            Self::StorageConflict(_) | Self::StorageUnavailable(_) => SERVER_ERROR_MESSAGE,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::OK
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            tracing::debug!(error = %self, "Rejected request");
        } else {
            tracing::error!(error = %self, "Storage failure");
        }

        let body = ErrorBody {
            error: self.public_message(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateShortId | StoreError::DuplicateOriginalUrl => {
                Self::StorageConflict(e.to_string())
            }
            StoreError::Unavailable(message) => Self::StorageUnavailable(message),
        }
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        Self::InvalidUrl(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        Self::InvalidUrl(e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        Self::InvalidUrl(e.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(e: FormRejection) -> Self {
        Self::InvalidUrl(e.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_url_is_reported_in_body() {
        let (status, body) = render(AppError::invalid_url("bad scheme")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], "invalid url");
    }

    #[tokio::test]
    async fn test_malformed_id_message() {
        let (status, body) = render(AppError::MalformedId("abc".to_string())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], "Wrong format");
    }

    #[tokio::test]
    async fn test_not_found_message() {
        let (status, body) = render(AppError::NotFound(42)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], "No short URL found for given input");
    }

    #[tokio::test]
    async fn test_storage_errors_hide_details() {
        let (status, body) = render(AppError::StorageUnavailable(
            "connection refused to 10.0.0.5:5432".to_string(),
        ))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Server error");

        let (status, _) = render(AppError::StorageConflict("retries exhausted".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_store_error_conversion() {
        assert!(matches!(
            AppError::from(StoreError::DuplicateShortId),
            AppError::StorageConflict(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::Unavailable("down".to_string())),
            AppError::StorageUnavailable(_)
        ));
    }

    #[test]
    fn test_resolve_error_is_invalid_url() {
        let error = AppError::from(ResolveError::NoAddresses("example.invalid".to_string()));
        assert!(matches!(error, AppError::InvalidUrl(_)));
        assert!(error.is_client_error());
    }
}
