//! Short id allocation policy.

use chrono::Utc;
use rand::Rng;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// Random draws attempted before falling back to a clock-derived id.
const MAX_RANDOM_PROBES: usize = 20;

/// Smallest upper bound of the random range.
const MIN_RANDOM_RANGE: i64 = 1000;

/// Growth of the random range per stored mapping.
const RANGE_PER_MAPPING: i64 = 1000;

/// Modulus of the clock-derived fallback id.
const FALLBACK_MODULUS: i64 = 100_000;

/// How new short ids are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllocationStrategy {
    /// `count + 1`, or one past the highest id in use when the id space has
    /// gaps. Dense and predictable.
    Sequential,
    /// Random draw from `[1, max(1000, count * 1000)]`. Sparse, hard to enumerate.
    #[default]
    Random,
}

impl FromStr for AllocationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "random" => Ok(Self::Random),
            other => Err(format!(
                "unknown allocation strategy '{other}', expected 'sequential' or 'random'"
            )),
        }
    }
}

impl fmt::Display for AllocationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => f.write_str("sequential"),
            Self::Random => f.write_str("random"),
        }
    }
}

/// Proposes candidate short ids.
///
/// A candidate is only a proposal: another writer may claim it first. The
/// repository's uniqueness constraint has the final word, and the caller
/// retries with a fresh candidate on conflict.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdAllocator {
    strategy: AllocationStrategy,
}

impl IdAllocator {
    pub fn new(strategy: AllocationStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> AllocationStrategy {
        self.strategy
    }

    /// Returns a candidate id, always `>= 1`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the repository cannot be queried.
    pub async fn next_candidate(&self, repository: &dyn MappingRepository) -> Result<i64, AppError> {
        let count = repository.count().await?;

        match self.strategy {
            AllocationStrategy::Sequential => {
                // Ids left by the random strategy can make `count + 1` a taken id.
                let highest = repository.max_short_id().await?.unwrap_or(0);
                Ok(count.max(highest).saturating_add(1))
            }
            AllocationStrategy::Random => self.random_candidate(repository, count).await,
        }
    }

    async fn random_candidate(
        &self,
        repository: &dyn MappingRepository,
        count: i64,
    ) -> Result<i64, AppError> {
        let upper = random_upper_bound(count);

        for probe in 1..=MAX_RANDOM_PROBES {
            let candidate = rand::rng().random_range(1..=upper);

            if repository.find_by_short_id(candidate).await?.is_none() {
                return Ok(candidate);
            }
            debug!(probe, candidate, "Random short id already taken");
        }

        let fallback = clock_fallback();
        warn!(
            upper,
            fallback, "Random short id probes exhausted, using clock-derived id"
        );
        Ok(fallback)
    }
}

/// Upper bound of the random range for a store holding `count` mappings.
pub fn random_upper_bound(count: i64) -> i64 {
    count.saturating_mul(RANGE_PER_MAPPING).max(MIN_RANDOM_RANGE)
}

/// Id derived from the wall clock, in `[1, 100000]`.
pub fn clock_fallback() -> i64 {
    Utc::now().timestamp_millis().rem_euclid(FALLBACK_MODULUS) + 1
}
