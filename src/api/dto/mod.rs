//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization. The error body is
//! defined with the error type in [`crate::error::ErrorBody`].

pub mod greeting;
pub mod health;
pub mod shorten;
