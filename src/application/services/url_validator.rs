//! Submission validation: format, parse, and hostname resolution.

use regex::Regex;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tracing::debug;
use url::{Host, Url};

use crate::error::AppError;
use crate::infrastructure::dns::HostResolver;

/// `scheme://rest` where scheme is http or https, any case.
static FORMAT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://.+").expect("valid URL format regex"));

/// Default bound on hostname resolution.
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_millis(5000);

/// Why a candidate was rejected. Only used for logs; callers always see
/// [`AppError::InvalidUrl`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlRejection {
    #[error("empty input")]
    Empty,

    #[error("not an http(s) URL")]
    Format,

    #[error("unparseable URL: {0}")]
    Parse(String),

    #[error("URL has no hostname")]
    MissingHost,

    #[error("hostname did not resolve")]
    Unresolvable,
}

/// Decides whether a submitted string may be shortened.
///
/// A candidate passes when, in order: it is non-empty after trimming, it matches
/// `^https?://.+` case-insensitively, it parses as a URL with a non-empty
/// hostname, and the hostname resolves before the timeout.
pub struct UrlValidator {
    resolver: Arc<dyn HostResolver>,
    timeout: Duration,
}

impl UrlValidator {
    pub fn new(resolver: Arc<dyn HostResolver>, timeout: Duration) -> Self {
        Self { resolver, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Trims surrounding whitespace. `None` when nothing is left.
    pub fn normalize(input: &str) -> Option<&str> {
        let trimmed = input.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub fn check_format(input: &str) -> bool {
        FORMAT_REGEX.is_match(input)
    }

    /// Parses the URL and returns its hostname.
    ///
    /// IPv6 literals are returned without brackets so they can be handed
    /// straight to the resolver.
    ///
    /// # Errors
    ///
    /// Returns [`UrlRejection::Parse`] for syntactically invalid URLs and
    /// [`UrlRejection::MissingHost`] when the hostname is empty.
    pub fn parse(input: &str) -> Result<String, UrlRejection> {
        let url = Url::parse(input).map_err(|e| UrlRejection::Parse(e.to_string()))?;

        let hostname = match url.host() {
            Some(Host::Domain(domain)) => domain.to_string(),
            Some(Host::Ipv4(addr)) => addr.to_string(),
            Some(Host::Ipv6(addr)) => addr.to_string(),
            None => String::new(),
        };

        if hostname.is_empty() {
            return Err(UrlRejection::MissingHost);
        }
        Ok(hostname)
    }

    /// Resolves `hostname`, giving up after the configured timeout.
    ///
    /// The lookup future is raced against the deadline and whichever finishes
    /// first decides the outcome. On timeout the lookup is dropped, so a late
    /// answer has nowhere to go and cannot affect the result.
    pub async fn resolve_host(&self, hostname: &str) -> bool {
        match tokio::time::timeout(self.timeout, self.resolver.resolve(hostname)).await {
            Ok(Ok(found)) => found,
            Ok(Err(e)) => {
                debug!(hostname, error = %e, "Hostname lookup failed");
                false
            }
            Err(_) => {
                debug!(
                    hostname,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Hostname lookup timed out"
                );
                false
            }
        }
    }

    /// Runs every check and returns the trimmed URL.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as a [`UrlRejection`].
    pub async fn check(&self, input: &str) -> Result<String, UrlRejection> {
        let candidate = Self::normalize(input).ok_or(UrlRejection::Empty)?;

        if !Self::check_format(candidate) {
            return Err(UrlRejection::Format);
        }

        let hostname = Self::parse(candidate)?;

        if !self.resolve_host(&hostname).await {
            return Err(UrlRejection::Unresolvable);
        }

        Ok(candidate.to_string())
    }

    /// Same as [`Self::check`] with every rejection collapsed into
    /// [`AppError::InvalidUrl`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] if any check fails.
    pub async fn validate(&self, input: &str) -> Result<String, AppError> {
        self.check(input).await.map_err(|reason| {
            debug!(%reason, "Rejected submission");
            AppError::InvalidUrl
        })
    }
}
