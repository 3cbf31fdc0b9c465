//! Error types for the discovery domain.

use thiserror::Error;

/// Error returned while parsing an eviction policy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown eviction policy: {0} (expected 'retain' or 'evict-missing')")]
pub struct ParseEvictionPolicyError(pub String);
