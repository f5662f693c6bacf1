//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::{BackendKind, MappingRepository};
use crate::error::AppError;

/// Row shape shared by every mapping query.
#[derive(Debug, sqlx::FromRow)]
struct MappingRow {
    short_id: i64,
    original_url: String,
}

impl From<MappingRow> for UrlMapping {
    fn from(row: MappingRow) -> Self {
        UrlMapping::new(row.short_id, row.original_url)
    }
}

/// PostgreSQL repository for url mappings.
///
/// Uniqueness is enforced by the schema: the primary key on `short_id` and a
/// unique index on `md5(original_url)`. The pool establishes connections lazily
/// and re-establishes dropped ones, so a database restart does not require a
/// service restart.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            INSERT INTO url_mappings (short_id, original_url)
            VALUES ($1, $2)
            RETURNING short_id, original_url
            "#,
        )
        .bind(new_mapping.short_id)
        .bind(&new_mapping.original_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_url(&self, original_url: &str) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT short_id, original_url
            FROM url_mappings
            WHERE md5(original_url) = md5($1) AND original_url = $1
            "#,
        )
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn find_by_short_id(&self, short_id: i64) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT short_id, original_url
            FROM url_mappings
            WHERE short_id = $1
            "#,
        )
        .bind(short_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn max_short_id(&self) -> Result<Option<i64>, AppError> {
        let max: Option<i64> = sqlx::query_scalar("SELECT MAX(short_id) FROM url_mappings")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(max)
    }

    async fn ping(&self) -> bool {
        match sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
        {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Database ping failed: {}", e);
                false
            }
        }
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Durable
    }
}
