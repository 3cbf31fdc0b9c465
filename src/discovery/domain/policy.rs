//! Cache eviction policy.

use super::ParseEvictionPolicyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What happens to cached records of containers that leave the inventory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvictionPolicy {
    /// Keep every record for the lifetime of the process.
    #[default]
    Retain,
    /// Drop records whose container is absent from a successful listing.
    EvictMissing,
}

impl EvictionPolicy {
    /// Returns the canonical configuration spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Retain => "retain",
            Self::EvictMissing => "evict-missing",
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvictionPolicy {
    type Err = ParseEvictionPolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "retain" => Ok(Self::Retain),
            "evict-missing" => Ok(Self::EvictMissing),
            _ => Err(ParseEvictionPolicyError(value.to_owned())),
        }
    }
}
