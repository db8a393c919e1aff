//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, error};
use url::Url;

use crate::application::services::parse_short_id;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short id to its original URL.
///
/// # Endpoint
///
/// `GET /api/shorturl/{short_url}`
///
/// # Request Flow
///
/// 1. Parse the id (non-integers answer `{"error": "Wrong format"}`)
/// 2. Check cache for the destination
/// 3. On cache miss, query the database and write the cache back asynchronously
/// 4. Return 302 Found
///
/// # Errors
///
/// Unknown ids answer `{"error": "No short URL found for given input"}`
/// with HTTP 200.
pub async fn redirect_handler(
    Path(raw_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let short_id = parse_short_id(&raw_id)?;

    let original_url = match state.cache.get_url(short_id).await {
        Ok(Some(cached_url)) => {
            debug!(short_id, "Cache HIT");
            metrics::counter!("shorturl_resolve_total", "outcome" => "found").increment(1);
            cached_url
        }
        Ok(None) => {
            debug!(short_id, "Cache MISS");

            let original_url = state.shortener.resolve_id(short_id).await?;

            let cache = state.cache.clone();
            let url_clone = original_url.clone();
            tokio::spawn(async move {
                if let Err(e) = cache.set_url(short_id, &url_clone, None).await {
                    error!("Failed to cache URL: {}", e);
                }
            });

            original_url
        }
        Err(e) => {
            error!("Cache error: {}", e);
            state.shortener.resolve_id(short_id).await?
        }
    };

    let location = location_header(&original_url)?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Builds a `Location` value. Plain ASCII URLs are sent as stored; anything
/// else goes out as the parser's percent-encoded serialization.
fn location_header(original_url: &str) -> Result<HeaderValue, AppError> {
    if original_url.is_ascii()
        && let Ok(value) = HeaderValue::from_str(original_url)
    {
        return Ok(value);
    }

    Url::parse(original_url)
        .ok()
        .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
        .ok_or_else(|| AppError::invalid_url("stored URL is not a valid redirect target"))
}
