//! Repository trait for url mapping storage.

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Which storage implementation backs a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// External datastore, survives restarts.
    Durable,
    /// In-process maps, lost on restart.
    Transient,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::Durable => "postgres",
            BackendKind::Transient => "memory",
        }
    }
}

/// Storage interface for url mappings.
///
/// The repository is the only reader and writer of persisted mappings. Both
/// implementations enforce uniqueness of `short_id` and of `original_url` at
/// insert time and report a violation as [`AppError::Conflict`], which callers
/// treat as a retryable outcome.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryMappingRepository`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Persists a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short id or the original URL is
    /// already stored.
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError>;

    /// Finds a mapping by its exact original URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_url(&self, original_url: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Finds a mapping by short id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_short_id(&self, short_id: i64) -> Result<Option<UrlMapping>, AppError>;

    /// Counts stored mappings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Returns the highest short id in use, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn max_short_id(&self) -> Result<Option<i64>, AppError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> bool;

    /// Identifies the backend for health reporting.
    fn kind(&self) -> BackendKind;
}
