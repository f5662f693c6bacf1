//! Handler for the shortening endpoint.

use axum::{
    Form, Json,
    extract::{FromRequest, Request, State},
    http::header,
};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Submission body read as JSON or as a urlencoded form, by `Content-Type`.
///
/// A body that cannot be read either way is reported as
/// [`AppError::InvalidUrl`], like any other unusable submission.
pub struct ShortenPayload(pub ShortenRequest);

impl<S> FromRequest<S> for ShortenPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        let parsed = if is_json {
            Json::<ShortenRequest>::from_request(req, state)
                .await
                .map(|Json(body)| body)
                .map_err(|e| e.body_text())
        } else {
            Form::<ShortenRequest>::from_request(req, state)
                .await
                .map(|Form(body)| body)
                .map_err(|e| e.body_text())
        };

        parsed.map(ShortenPayload).map_err(|reason| {
            tracing::debug!(%reason, "Unreadable submission body");
            AppError::InvalidUrl
        })
    }
}

/// Shortens a URL, or returns the existing short url for it.
///
/// # Endpoint
///
/// `POST /api/shorturl`
///
/// # Request Body
///
/// `url=https://www.freecodecamp.org` (form) or
/// `{"url": "https://www.freecodecamp.org"}` (JSON).
///
/// # Response
///
/// ```json
/// { "original_url": "https://www.freecodecamp.org", "short_url": 1 }
/// ```
///
/// # Errors
///
/// - 200 with `{"error": "invalid url"}` if the URL fails validation,
///   including when its hostname does not resolve in time
/// - 500 with the same body on storage faults
pub async fn shorten_handler(
    State(state): State<AppState>,
    ShortenPayload(request): ShortenPayload,
) -> Result<Json<ShortenResponse>, AppError> {
    let original_url = state.validator.validate(&request.url).await?;

    let mapping = state.mapping_service.find_or_create(&original_url).await?;

    Ok(Json(mapping.into()))
}
