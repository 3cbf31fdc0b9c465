//! Registry-safe service names.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Maximum length of a registry service name, matching a DNS label.
pub const MAX_SERVICE_NAME_LENGTH: usize = 64;

#[expect(
    clippy::expect_used,
    reason = "the pattern is a literal exercised by the unit tests"
)]
static DNS_UNSAFE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^A-Za-z0-9-]+").expect("valid pattern"));

/// Service name restricted to `[A-Za-z0-9-]` and at most 64 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistryServiceName(String);

impl RegistryServiceName {
    /// Sanitizes a raw container or server name.
    ///
    /// One leading `/` (as in Docker container names) is removed, each run of
    /// characters outside `[A-Za-z0-9-]` becomes one `-`, and the result is
    /// trimmed of surrounding hyphens and cut to
    /// [`MAX_SERVICE_NAME_LENGTH`] characters. Sanitizing an already
    /// sanitized name returns it unchanged.
    #[must_use]
    pub fn sanitize(raw: &str) -> Self {
        let unprefixed = raw.strip_prefix('/').unwrap_or(raw);
        let replaced = DNS_UNSAFE_RUN.replace_all(unprefixed, "-");
        let truncated: String = replaced
            .trim_matches('-')
            .chars()
            .take(MAX_SERVICE_NAME_LENGTH)
            .collect();
        Self(truncated.trim_end_matches('-').to_owned())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when nothing survived sanitization.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for RegistryServiceName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RegistryServiceName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
