//! Mapping creation and lookup.

use std::sync::Arc;
use tracing::{debug, info};

use crate::application::services::id_allocator::IdAllocator;
use crate::domain::ShortId;
use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::{BackendKind, MappingRepository};
use crate::error::AppError;

/// Insert attempts before find-or-create gives up.
const MAX_INSERT_ATTEMPTS: usize = 20;

/// Service owning the url mapping lifecycle.
///
/// Mappings are created once, on the first successful submission of a URL, and
/// are never changed afterwards. Uniqueness of both the short id and the URL is
/// delegated to the repository; this service only reacts to conflicts, so it
/// behaves the same with several instances sharing one database.
pub struct MappingService {
    repository: Arc<dyn MappingRepository>,
    allocator: IdAllocator,
}

impl MappingService {
    /// Creates a new mapping service.
    pub fn new(repository: Arc<dyn MappingRepository>, allocator: IdAllocator) -> Self {
        Self {
            repository,
            allocator,
        }
    }

    /// Returns the existing mapping for `original_url`, or creates one.
    ///
    /// # Concurrency
    ///
    /// Two requests for the same new URL may both miss the first lookup. The
    /// loser's insert then fails with a conflict, the URL is looked up again, and
    /// the winner's mapping is returned. A conflict on the short id alone (two
    /// different URLs drawing the same id) just triggers a fresh candidate.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors or if no free id is
    /// found within the retry budget.
    pub async fn find_or_create(&self, original_url: &str) -> Result<UrlMapping, AppError> {
        if let Some(existing) = self.repository.find_by_url(original_url).await? {
            debug!(short_id = existing.short_id, "URL already shortened");
            return Ok(existing);
        }

        for attempt in 1..=MAX_INSERT_ATTEMPTS {
            let short_id = self
                .allocator
                .next_candidate(self.repository.as_ref())
                .await?;

            let new_mapping = NewUrlMapping {
                short_id,
                original_url: original_url.to_string(),
            };

            match self.repository.insert(new_mapping).await {
                Ok(mapping) => {
                    info!(short_id = mapping.short_id, "Created short url");
                    return Ok(mapping);
                }
                Err(AppError::Conflict { constraint }) => {
                    debug!(attempt, short_id, %constraint, "Insert conflicted, retrying");

                    if let Some(existing) = self.repository.find_by_url(original_url).await? {
                        return Ok(existing);
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(format!(
            "no free short id after {MAX_INSERT_ATTEMPTS} attempts"
        )))
    }

    /// Looks up the mapping for a short id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping has this id.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, short_id: ShortId) -> Result<UrlMapping, AppError> {
        self.repository
            .find_by_short_id(short_id.get())
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Parses a raw path segment and looks it up.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for malformed segments as well as for
    /// unknown ids. Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve_segment(&self, segment: &str) -> Result<UrlMapping, AppError> {
        let short_id = segment.parse::<ShortId>().map_err(|e| {
            debug!(segment, reason = %e, "Rejected short id");
            AppError::NotFound
        })?;

        self.resolve(short_id).await
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    pub async fn max_short_id(&self) -> Result<Option<i64>, AppError> {
        self.repository.max_short_id().await
    }

    /// Reports whether the storage backend is reachable.
    pub async fn is_healthy(&self) -> bool {
        self.repository.ping().await
    }

    pub fn backend(&self) -> BackendKind {
        self.repository.kind()
    }
}
