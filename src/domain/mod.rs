//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - The [`entities::UrlMapping`] record
//! - [`repositories`] - Storage trait implemented by the infrastructure layer
//! - [`short_id`] - Validation of the public numeric identifier
//!
//! The domain layer has no dependencies on infrastructure or presentation layers.
//! Business logic lives in services (see [`crate::application::services`]).

pub mod entities;
pub mod repositories;
pub mod short_id;

pub use short_id::{ShortId, ShortIdError};
