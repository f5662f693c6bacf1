#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use shorturl::application::services::{
    AllocationStrategy, IdAllocator, MappingService, UrlValidator,
};
use shorturl::domain::repositories::MappingRepository;
use shorturl::infrastructure::cache::{CacheError, CacheResult, CacheService, NullCache};
use shorturl::infrastructure::dns::{HostResolver, StaticResolver};
use shorturl::infrastructure::persistence::MemoryMappingRepository;
use shorturl::routes::build_router;
use shorturl::state::AppState;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const KNOWN_HOSTS: [&str; 3] = ["www.freecodecamp.org", "example.com", "www.example.org"];

pub const TEST_TIMEOUT: Duration = Duration::from_millis(200);

/// Resolver that never answers.
pub struct HangingResolver;

#[async_trait]
impl HostResolver for HangingResolver {
    async fn resolve(&self, _hostname: &str) -> io::Result<bool> {
        std::future::pending().await
    }
}

/// In-process cache that records writes. With `failing` set every call errors.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<i64, String>>,
    failing: bool,
}

impl MemoryCache {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_entry(short_id: i64, original_url: &str) -> Self {
        let cache = Self::default();
        cache
            .entries
            .lock()
            .unwrap()
            .insert(short_id, original_url.to_string());
        cache
    }

    pub fn entry(&self, short_id: i64) -> Option<String> {
        self.entries.lock().unwrap().get(&short_id).cloned()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_url(&self, short_id: i64) -> CacheResult<Option<String>> {
        if self.failing {
            return Err(CacheError::ConnectionError("cache offline".to_string()));
        }
        Ok(self.entry(short_id))
    }

    async fn set_url(
        &self,
        short_id: i64,
        original_url: &str,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        if self.failing {
            return Err(CacheError::ConnectionError("cache offline".to_string()));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(short_id, original_url.to_string());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        !self.failing
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

pub fn create_test_state_with_cache(
    repository: Arc<dyn MappingRepository>,
    cache: Arc<dyn CacheService>,
) -> AppState {
    let validator = Arc::new(UrlValidator::new(
        Arc::new(StaticResolver::new(KNOWN_HOSTS)),
        TEST_TIMEOUT,
    ));
    let mapping_service = Arc::new(MappingService::new(
        repository,
        IdAllocator::new(AllocationStrategy::Sequential),
    ));

    AppState::new(validator, mapping_service, cache)
}

pub fn create_test_state_with(
    repository: Arc<dyn MappingRepository>,
    resolver: Arc<dyn HostResolver>,
) -> AppState {
    let validator = Arc::new(UrlValidator::new(resolver, TEST_TIMEOUT));
    let mapping_service = Arc::new(MappingService::new(
        repository,
        IdAllocator::new(AllocationStrategy::Sequential),
    ));

    AppState::new(validator, mapping_service, Arc::new(NullCache))
}

pub fn create_test_state() -> AppState {
    create_test_state_with(
        Arc::new(MemoryMappingRepository::new()),
        Arc::new(StaticResolver::new(KNOWN_HOSTS)),
    )
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state, "public")).unwrap()
}
