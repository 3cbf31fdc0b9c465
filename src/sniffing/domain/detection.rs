//! Outcome of probing one endpoint.

use crate::service::domain::{ProtocolTag, ServiceRecord};
use std::fmt;

/// Result of a sniffer or of a whole sniffer chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// The protocol was confirmed and a record built.
    Detected(ServiceRecord),
    /// The protocol was not confirmed.
    NotDetected(NotDetectedReason),
}

impl Detection {
    /// Returns the record when detected.
    #[must_use]
    pub fn into_record(self) -> Option<ServiceRecord> {
        match self {
            Self::Detected(record) => Some(record),
            Self::NotDetected(_) => None,
        }
    }

    /// Returns `true` when a protocol was confirmed.
    #[must_use]
    pub const fn is_detected(&self) -> bool {
        matches!(self, Self::Detected(_))
    }
}

/// Why a sniffer did not confirm its protocol.
///
/// None of these are errors: most containers speak none of the known
/// protocols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotDetectedReason {
    /// The container exposes no network ports.
    NoExposedPorts,
    /// The endpoint could not be reached within the timeout.
    Unreachable(String),
    /// The endpoint answered with a non-200 status.
    UnexpectedStatus(u16),
    /// The response could not be interpreted as the expected document.
    MalformedDocument(String),
    /// The document lacks a path the protocol requires.
    MissingRequiredPath(&'static str),
    /// The streaming handshake did not complete.
    HandshakeFailed(String),
    /// Detection for this protocol is not implemented.
    Unimplemented(ProtocolTag),
    /// Every sniffer in the chain declined.
    ChainExhausted,
}

impl fmt::Display for NotDetectedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoExposedPorts => f.write_str("no exposed ports"),
            Self::Unreachable(cause) => write!(f, "unreachable: {cause}"),
            Self::UnexpectedStatus(status) => write!(f, "unexpected status {status}"),
            Self::MalformedDocument(cause) => write!(f, "malformed document: {cause}"),
            Self::MissingRequiredPath(path) => write!(f, "missing required path {path}"),
            Self::HandshakeFailed(cause) => write!(f, "handshake failed: {cause}"),
            Self::Unimplemented(tag) => write!(f, "{tag} detection not implemented"),
            Self::ChainExhausted => f.write_str("no sniffer matched"),
        }
    }
}
