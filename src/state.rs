//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{MappingService, UrlValidator};
use crate::infrastructure::cache::CacheService;

/// Handles to the services, built once at startup.
///
/// The storage backend inside [`MappingService`] is chosen before this state is
/// constructed; handlers never inspect configuration.
#[derive(Clone)]
pub struct AppState {
    pub validator: Arc<UrlValidator>,
    pub mapping_service: Arc<MappingService>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    pub fn new(
        validator: Arc<UrlValidator>,
        mapping_service: Arc<MappingService>,
        cache: Arc<dyn CacheService>,
    ) -> Self {
        Self {
            validator,
            mapping_service,
            cache,
        }
    }
}
