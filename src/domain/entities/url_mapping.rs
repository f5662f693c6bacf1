//! Url mapping entity: the association between a short id and an original URL.

use serde::Serialize;

/// A stored association between a numeric short id and the URL it redirects to.
///
/// Both fields are immutable once the mapping has been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlMapping {
    pub short_id: i64,
    pub original_url: String,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(short_id: i64, original_url: String) -> Self {
        Self {
            short_id,
            original_url,
        }
    }
}

/// Input data for persisting a new mapping.
///
/// The short id is chosen by the allocator before the insert is attempted;
/// the repository rejects it with a conflict if it is already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlMapping {
    pub short_id: i64,
    pub original_url: String,
}

impl From<NewUrlMapping> for UrlMapping {
    fn from(new: NewUrlMapping) -> Self {
        Self::new(new.short_id, new.original_url)
    }
}
