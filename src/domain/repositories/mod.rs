//! Repository trait definitions for the domain layer.
//!
//! [`MappingRepository`] is the storage strategy interface. It is implemented
//! twice in `crate::infrastructure::persistence`, once for PostgreSQL and once
//! for in-process maps; one of them is chosen at startup from configuration.
//!
//! Mock implementations are generated via `mockall` for unit tests.

pub mod mapping_repository;

pub use mapping_repository::{BackendKind, MappingRepository};

#[cfg(test)]
pub use mapping_repository::MockMappingRepository;
