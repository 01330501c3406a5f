//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Identifier of a sweet: a positive whole number, immutable once assigned.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct SweetId(u64);

impl SweetId {
    /// Validate a raw identifier coming from a caller.
    pub fn new(raw: i64) -> DomainResult<Self> {
        if raw <= 0 {
            return Err(DomainError::invalid_argument(format!(
                "sweet id must be a positive integer, got {raw}"
            )));
        }
        Ok(Self(raw as u64))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for SweetId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<u64> for SweetId {
    type Error = DomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(DomainError::invalid_argument(
                "sweet id must be a positive integer, got 0",
            ));
        }
        Ok(Self(value))
    }
}

impl TryFrom<i64> for SweetId {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SweetId> for u64 {
    fn from(value: SweetId) -> Self {
        value.0
    }
}

impl FromStr for SweetId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<i64>()
            .map_err(|e| DomainError::invalid_argument(format!("SweetId: {s:?}: {e}")))?;
        Self::new(raw)
    }
}
