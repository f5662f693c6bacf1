//! Hostname resolution.
//!
//! Provides a [`HostResolver`] trait with two implementations:
//! - [`SystemResolver`] - uses the operating system resolver via Tokio
//! - [`StaticResolver`] - fixed answers, for tests and offline runs

mod resolver;

pub use resolver::{HostResolver, StaticResolver, SystemResolver};
