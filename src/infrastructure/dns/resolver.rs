//! Resolver trait and implementations.

use async_trait::async_trait;
use std::collections::HashSet;
use std::io;
use tracing::debug;

/// Resolves a hostname to at least one address.
///
/// Implementations may take arbitrarily long; callers bound them with a timeout
/// and drop the future when it elapses.
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Returns `Ok(true)` when the host has at least one address.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the lookup itself fails
    /// (for example, `NXDOMAIN`).
    async fn resolve(&self, hostname: &str) -> io::Result<bool>;
}

/// Resolver backed by the system's `getaddrinfo`.
#[derive(Debug, Default, Clone)]
pub struct SystemResolver;

impl SystemResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HostResolver for SystemResolver {
    async fn resolve(&self, hostname: &str) -> io::Result<bool> {
        // Port is irrelevant for resolution, but lookup_host needs one.
        let mut addrs = tokio::net::lookup_host((hostname, 0)).await?;
        let found = addrs.next().is_some();
        debug!(hostname, found, "DNS lookup finished");
        Ok(found)
    }
}

/// Resolver that knows a fixed set of hosts.
///
/// Hosts outside the set fail with `NotFound`.
#[derive(Debug, Default, Clone)]
pub struct StaticResolver {
    known: HashSet<String>,
}

impl StaticResolver {
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: hosts
                .into_iter()
                .map(|h| h.into().to_ascii_lowercase())
                .collect(),
        }
    }
}

#[async_trait]
impl HostResolver for StaticResolver {
    async fn resolve(&self, hostname: &str) -> io::Result<bool> {
        if self.known.contains(&hostname.to_ascii_lowercase()) {
            Ok(true)
        } else {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("unknown host {hostname}"),
            ))
        }
    }
}
