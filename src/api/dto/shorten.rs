//! DTOs for the shortening endpoint.

use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::UrlMapping;
use crate::error::AppError;

/// Request to shorten a URL.
///
/// `url` is optional at the serde level so that a missing field is
/// reported as `invalid url` instead of a deserialization failure.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[serde(default)]
    #[validate(
        required(message = "url is required"),
        length(min = 1, message = "url must not be empty")
    )]
    pub url: Option<String>,
}

/// Successful shortening result.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub original_url: String,
    pub short_url: i64,
}

impl From<UrlMapping> for ShortenResponse {
    fn from(mapping: UrlMapping) -> Self {
        Self {
            original_url: mapping.original_url,
            short_url: mapping.short_id,
        }
    }
}

/// Extracts a [`ShortenRequest`] from a JSON or urlencoded form body.
///
/// The HTML form posts `application/x-www-form-urlencoded`; API clients
/// post JSON. Any rejection becomes [`AppError::InvalidUrl`].
#[derive(Debug)]
pub struct ShortenPayload(pub ShortenRequest);

impl<S> FromRequest<S> for ShortenPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.starts_with("application/json"));

        let payload = if is_json {
            let Json(payload) = Json::<ShortenRequest>::from_request(req, state).await?;
            payload
        } else {
            let Form(payload) = Form::<ShortenRequest>::from_request(req, state).await?;
            payload
        };

        Ok(Self(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_missing_url_fails_validation() {
        let request = ShortenRequest { url: None };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_empty_url_fails_validation() {
        let request = ShortenRequest {
            url: Some(String::new()),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_present_url_passes_validation() {
        let request = ShortenRequest {
            url: Some("https://www.example.com".to_string()),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_response_from_mapping() {
        let mapping = UrlMapping::new(3, "https://www.example.com".to_string(), Utc::now());
        let json = serde_json::to_value(ShortenResponse::from(mapping)).unwrap();

        assert_eq!(json["original_url"], "https://www.example.com");
        assert_eq!(json["short_url"], 3);
    }
}
