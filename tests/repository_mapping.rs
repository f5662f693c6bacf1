use shorturl::application::services::{AllocationStrategy, IdAllocator, MappingService};
use shorturl::domain::entities::NewUrlMapping;
use shorturl::domain::repositories::{BackendKind, MappingRepository};
use shorturl::error::AppError;
use shorturl::infrastructure::persistence::PgMappingRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn repository(pool: PgPool) -> PgMappingRepository {
    PgMappingRepository::new(Arc::new(pool))
}

fn new_mapping(short_id: i64, url: &str) -> NewUrlMapping {
    NewUrlMapping {
        short_id,
        original_url: url.to_string(),
    }
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_insert_and_find(pool: PgPool) {
    let repo = repository(pool);

    let created = repo
        .insert(new_mapping(1, "https://www.freecodecamp.org"))
        .await
        .unwrap();
    assert_eq!(created.short_id, 1);

    let by_url = repo
        .find_by_url("https://www.freecodecamp.org")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_url, created);

    let by_id = repo.find_by_short_id(1).await.unwrap().unwrap();
    assert_eq!(by_id, created);

    assert!(repo.find_by_short_id(2).await.unwrap().is_none());
    assert!(repo.find_by_url("https://other.com").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_duplicate_id_is_conflict(pool: PgPool) {
    let repo = repository(pool);

    repo.insert(new_mapping(5, "https://a.com")).await.unwrap();
    let err = repo.insert(new_mapping(5, "https://b.com")).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_duplicate_url_is_conflict(pool: PgPool) {
    let repo = repository(pool);

    repo.insert(new_mapping(5, "https://a.com")).await.unwrap();
    let err = repo.insert(new_mapping(6, "https://a.com")).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_non_positive_id_is_rejected(pool: PgPool) {
    let repo = repository(pool);

    let err = repo.insert(new_mapping(0, "https://a.com")).await.unwrap_err();

    assert!(matches!(err, AppError::Internal { .. }));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_count_max_and_ping(pool: PgPool) {
    let repo = repository(pool);

    assert_eq!(repo.count().await.unwrap(), 0);
    assert_eq!(repo.max_short_id().await.unwrap(), None);

    repo.insert(new_mapping(3, "https://a.com")).await.unwrap();
    repo.insert(new_mapping(17, "https://b.com")).await.unwrap();

    assert_eq!(repo.count().await.unwrap(), 2);
    assert_eq!(repo.max_short_id().await.unwrap(), Some(17));
    assert!(repo.ping().await);
    assert_eq!(repo.kind(), BackendKind::Durable);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_concurrent_find_or_create_converges(pool: PgPool) {
    let service = Arc::new(MappingService::new(
        Arc::new(repository(pool)),
        IdAllocator::new(AllocationStrategy::Random),
    ));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.find_or_create("https://same.com").await })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().short_id);
    }

    ids.dedup();
    assert_eq!(ids.len(), 1);
    assert_eq!(service.count().await.unwrap(), 1);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_sequential_skips_ids_taken_by_random_allocation(pool: PgPool) {
    let repo = Arc::new(repository(pool));
    repo.insert(new_mapping(2, "https://a.com")).await.unwrap();
    repo.insert(new_mapping(734, "https://b.com")).await.unwrap();

    let service = MappingService::new(repo, IdAllocator::new(AllocationStrategy::Sequential));
    let created = service.find_or_create("https://c.com").await.unwrap();

    assert_eq!(created.short_id, 735);
}
