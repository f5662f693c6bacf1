//! Business logic services for the application layer.

pub mod id_allocator;
pub mod mapping_service;
pub mod url_validator;

pub use id_allocator::{AllocationStrategy, IdAllocator};
pub use mapping_service::MappingService;
pub use url_validator::{UrlRejection, UrlValidator};
