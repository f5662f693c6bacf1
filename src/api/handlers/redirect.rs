//! Handler for short url redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, error};
use url::Url;

use crate::domain::ShortId;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short url to its original URL.
///
/// # Endpoint
///
/// `GET /api/shorturl/{short_url}`
///
/// # Request Flow
///
/// 1. Parse the path segment as a positive integer
/// 2. Check cache for the URL
/// 3. On cache miss, look the id up in storage
/// 4. Asynchronously populate the cache
/// 5. Return 302 Found
///
/// # Errors
///
/// Returns 404 with `{"error": "invalid url"}` if the segment is not a positive
/// integer or no mapping has that id. Returns 500 on storage faults.
pub async fn redirect_handler(
    Path(segment): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let short_id: ShortId = segment.parse().map_err(|e| {
        debug!(%segment, reason = %e, "Rejected short id");
        AppError::NotFound
    })?;

    let original_url = match state.cache.get_url(short_id.get()).await {
        Ok(Some(cached_url)) => cached_url,
        Ok(None) => {
            let mapping = state.mapping_service.resolve(short_id).await?;

            let cache = state.cache.clone();
            let url = mapping.original_url.clone();
            tokio::spawn(async move {
                if let Err(e) = cache.set_url(short_id.get(), &url, None).await {
                    error!("Failed to cache URL: {}", e);
                }
            });

            mapping.original_url
        }
        Err(e) => {
            error!("Cache error: {}", e);
            state.mapping_service.resolve(short_id).await?.original_url
        }
    };

    Ok(found(&original_url))
}

/// Builds a `302 Found` response.
///
/// The stored URL is used verbatim when it is a valid header value; otherwise
/// its ASCII serialization (punycode host, percent-encoded path) is sent.
fn found(original_url: &str) -> Response {
    let location = HeaderValue::from_str(original_url)
        .ok()
        .or_else(|| {
            Url::parse(original_url)
                .ok()
                .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
        });

    match location {
        Some(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
        None => AppError::internal(format!("stored URL is not redirectable: {original_url}"))
            .into_response(),
    }
}
