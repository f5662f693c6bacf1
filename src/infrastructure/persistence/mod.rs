//! Mapping repository implementations.
//!
//! # Repositories
//!
//! - [`PgMappingRepository`] - durable storage in PostgreSQL via SQLx
//! - [`MemoryMappingRepository`] - transient in-process storage
//!
//! [`connect_pool`] builds the lazily-connecting PostgreSQL pool and
//! [`run_migrations`] applies the schema with retry.

pub mod memory_mapping_repository;
pub mod pg_mapping_repository;
mod pool;

pub use memory_mapping_repository::MemoryMappingRepository;
pub use pg_mapping_repository::PgMappingRepository;
pub use pool::{PoolSettings, connect_pool, run_migrations};
