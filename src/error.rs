//! Application error type and its HTTP representation.
//!
//! Every failure is reported to clients with the same body,
//! `{"error": "invalid url"}`. Only the status code differs:
//!
//! - [`AppError::InvalidUrl`] - 200 OK (validation failures are data)
//! - [`AppError::NotFound`] - 404 Not Found
//! - [`AppError::Conflict`] / [`AppError::Internal`] - 500 Internal Server Error

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Literal message carried by every error response.
pub const INVALID_URL: &str = "invalid url";

/// Wire format of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

impl ErrorBody {
    pub fn invalid_url() -> Self {
        Self { error: INVALID_URL }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Submitted URL failed format, parse, or hostname resolution checks.
    #[error("invalid url")]
    InvalidUrl,

    /// Lookup id was malformed or has no mapping.
    #[error("short url not found")]
    NotFound,

    /// A uniqueness constraint rejected an insert.
    #[error("unique constraint violation ({constraint})")]
    Conflict { constraint: String },

    /// Storage or infrastructure failure.
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn conflict(constraint: impl Into<String>) -> Self {
        Self::Conflict {
            constraint: constraint.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl => StatusCode::OK,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (status, Json(ErrorBody::invalid_url())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

/// Converts a database error, keeping unique violations distinguishable.
///
/// Unique violations become [`AppError::Conflict`] carrying the constraint name so
/// the allocator can retry; everything else is an [`AppError::Internal`].
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return AppError::conflict(db.constraint().unwrap_or("unknown"));
    }

    AppError::internal(format!("database error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_url_is_ok_status() {
        let (status, body) = body_of(AppError::InvalidUrl).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "error": "invalid url" }));
    }

    #[tokio::test]
    async fn test_not_found_is_404() {
        let (status, body) = body_of(AppError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "invalid url");
    }

    #[tokio::test]
    async fn test_internal_hides_message() {
        let (status, body) = body_of(AppError::internal("connection refused")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "invalid url" }));
    }

    #[test]
    fn test_conflict_status() {
        assert_eq!(
            AppError::conflict("url_mappings_pkey").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_non_database_sqlx_error_is_internal() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::Internal { .. }));
    }
}
