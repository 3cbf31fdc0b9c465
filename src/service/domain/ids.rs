//! Identifier types for the service domain.

use super::ServiceDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of the container behind a service.
///
/// The value is stable for as long as the container exists and doubles as
/// the discovery cache key and the registry entry identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContainerId(String);

impl ContainerId {
    /// Creates a container identifier.
    ///
    /// The value is kept verbatim; it is only checked for emptiness.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceDomainError::EmptyContainerId`] when the value is
    /// empty or whitespace only.
    pub fn new(value: impl Into<String>) -> Result<Self, ServiceDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ServiceDomainError::EmptyContainerId);
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the first twelve characters, as shown by container tooling.
    #[must_use]
    pub fn short(&self) -> &str {
        self.0
            .char_indices()
            .nth(12)
            .and_then(|(idx, _)| self.0.get(..idx))
            .unwrap_or(&self.0)
    }
}

impl TryFrom<String> for ContainerId {
    type Error = ServiceDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContainerId> for String {
    fn from(value: ContainerId) -> Self {
        value.0
    }
}

impl AsRef<str> for ContainerId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
