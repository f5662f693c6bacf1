//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer and wraps the
//! outside world the services depend on.
//!
//! # Modules
//!
//! - [`cache`] - Redirect cache (Redis and no-op implementations)
//! - [`dns`] - Hostname resolution
//! - [`persistence`] - PostgreSQL and in-memory repository implementations

pub mod cache;
pub mod dns;
pub mod persistence;
