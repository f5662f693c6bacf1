//! DTOs for the shortening endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::UrlMapping;

/// Submission body, accepted as JSON or as a urlencoded form.
///
/// A missing `url` field is treated as an empty submission.
#[derive(Debug, Default, Deserialize)]
pub struct ShortenRequest {
    #[serde(default)]
    pub url: String,
}

/// Successful submission.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
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
