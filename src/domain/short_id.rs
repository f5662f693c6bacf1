//! Short id parsing for the lookup path segment.

use std::fmt;
use std::str::FromStr;

/// A validated short id: a positive integer.
///
/// Lookup requests carry the id as a raw path segment. Only plain ASCII decimal
/// digits are accepted; signs, whitespace, fractions and exponents are rejected
/// along with zero and values that overflow `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShortId(i64);

/// Reasons a path segment is not a usable short id.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ShortIdError {
    #[error("short id must be a decimal number")]
    NotNumeric,

    #[error("short id must be at least 1")]
    NotPositive,

    #[error("short id is out of range")]
    OutOfRange,
}

impl ShortId {
    /// Smallest id ever handed out.
    pub const MIN: i64 = 1;

    /// Wraps an already-validated integer.
    ///
    /// # Errors
    ///
    /// Returns [`ShortIdError::NotPositive`] for values below [`ShortId::MIN`].
    pub fn new(value: i64) -> Result<Self, ShortIdError> {
        if value < Self::MIN {
            return Err(ShortIdError::NotPositive);
        }
        Ok(Self(value))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl FromStr for ShortId {
    type Err = ShortIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ShortIdError::NotNumeric);
        }

        let value: i64 = s.parse().map_err(|_| ShortIdError::OutOfRange)?;
        Self::new(value)
    }
}

impl fmt::Display for ShortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
