//! Core domain entities representing the business data model.
//!
//! The service persists exactly one kind of record, [`UrlMapping`]. Creation input
//! is modelled separately as [`NewUrlMapping`] so the allocator's choice of id is
//! explicit at the repository boundary.

pub mod url_mapping;

pub use url_mapping::{NewUrlMapping, UrlMapping};
