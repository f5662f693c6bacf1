//! In-process implementation of the mapping repository.
//!
//! Used when no database is configured. Mappings live only as long as the
//! process: a restart starts again from an empty store.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::{BackendKind, MappingRepository};
use crate::error::AppError;

#[derive(Debug, Default)]
struct MemoryState {
    /// Ordered so the highest id is at the end.
    by_id: BTreeMap<i64, String>,
    by_url: HashMap<String, i64>,
    /// Number of mappings ever inserted. Nothing is deleted, so this is also
    /// the current count.
    counter: i64,
}

/// Transient repository holding both lookup directions in memory.
///
/// All state sits behind a single mutex. Every operation acquires it once and
/// never awaits while holding it, so the check-and-insert in [`insert`] cannot
/// interleave with another writer.
///
/// [`insert`]: MappingRepository::insert
#[derive(Debug, Default)]
pub struct MemoryMappingRepository {
    state: Mutex<MemoryState>,
}

impl MemoryMappingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, AppError> {
        self.state
            .lock()
            .map_err(|_| AppError::internal("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl MappingRepository for MemoryMappingRepository {
    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        let mut state = self.lock()?;

        if state.by_id.contains_key(&new_mapping.short_id) {
            return Err(AppError::conflict("short_id"));
        }
        if state.by_url.contains_key(&new_mapping.original_url) {
            return Err(AppError::conflict("original_url"));
        }

        state
            .by_id
            .insert(new_mapping.short_id, new_mapping.original_url.clone());
        state
            .by_url
            .insert(new_mapping.original_url.clone(), new_mapping.short_id);
        state.counter += 1;

        Ok(new_mapping.into())
    }

    async fn find_by_url(&self, original_url: &str) -> Result<Option<UrlMapping>, AppError> {
        let state = self.lock()?;
        Ok(state
            .by_url
            .get(original_url)
            .map(|&id| UrlMapping::new(id, original_url.to_string())))
    }

    async fn find_by_short_id(&self, short_id: i64) -> Result<Option<UrlMapping>, AppError> {
        let state = self.lock()?;
        Ok(state
            .by_id
            .get(&short_id)
            .map(|url| UrlMapping::new(short_id, url.clone())))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.lock()?.counter)
    }

    async fn max_short_id(&self) -> Result<Option<i64>, AppError> {
        Ok(self.lock()?.by_id.keys().next_back().copied())
    }

    async fn ping(&self) -> bool {
        self.lock().is_ok()
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Transient
    }
}
