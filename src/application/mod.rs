//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::url_validator::UrlValidator`] - Decides whether a submission may be shortened
//! - [`services::mapping_service::MappingService`] - Find-or-create and lookup of mappings
//! - [`services::id_allocator::IdAllocator`] - Short id allocation policy

pub mod services;
