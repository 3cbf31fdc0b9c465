//! Agent protocol tags.

use super::ParseProtocolTagError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Agent-communication protocol detected behind an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProtocolTag {
    /// Agent Connect Protocol, described by an OpenAPI document.
    Acp,
    /// Model Context Protocol over a server-sent event stream.
    Mcp,
    /// Agent Protocol.
    Ap,
    /// Agent-to-agent protocol.
    A2a,
}

impl ProtocolTag {
    /// All known tags in default probing order.
    pub const ALL: [Self; 4] = [Self::Acp, Self::Mcp, Self::Ap, Self::A2a];

    /// Returns the canonical upper-case representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Acp => "ACP",
            Self::Mcp => "MCP",
            Self::Ap => "AP",
            Self::A2a => "A2A",
        }
    }
}

impl fmt::Display for ProtocolTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProtocolTag {
    type Error = ParseProtocolTagError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "ACP" => Ok(Self::Acp),
            "MCP" => Ok(Self::Mcp),
            "AP" => Ok(Self::Ap),
            "A2A" => Ok(Self::A2a),
            _ => Err(ParseProtocolTagError(value.to_owned())),
        }
    }
}

impl FromStr for ProtocolTag {
    type Err = ParseProtocolTagError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}
