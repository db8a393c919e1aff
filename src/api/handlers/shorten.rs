//! Handler for the shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenPayload, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates (or returns the existing) short URL for the submitted URL.
///
/// # Endpoint
///
/// `POST /api/shorturl`
///
/// # Request Body
///
/// JSON `{"url": "https://www.example.com"}` or the urlencoded form
/// field `url=https%3A%2F%2Fwww.example.com`.
///
/// # Response
///
/// ```json
/// { "original_url": "https://www.example.com", "short_url": 1 }
/// ```
///
/// # Errors
///
/// Invalid input is answered with HTTP 200 and `{"error": "invalid url"}`.
/// Storage failures are answered with HTTP 500 and `{"error": "Server error"}`.
pub async fn shorten_handler(
    State(state): State<AppState>,
    ShortenPayload(payload): ShortenPayload,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let url = payload.url.unwrap_or_default();
    let mapping = state.shortener.shorten(&url).await?;

    Ok(Json(mapping.into()))
}
