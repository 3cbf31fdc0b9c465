//! Error types for the sniffing domain.

use thiserror::Error;

/// Errors raised while interpreting MCP handshake messages.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandshakeError {
    /// The server answered the `initialize` request with a JSON-RPC error.
    #[error("server rejected initialize: {0}")]
    Rejected(String),

    /// The response lacks a field the handshake needs.
    #[error("initialize response missing {0}")]
    MissingField(&'static str),

    /// The stream ended before the expected message arrived.
    #[error("stream closed before {0}")]
    StreamClosed(&'static str),

    /// The announced message endpoint is not a usable URL.
    #[error("invalid message endpoint '{0}'")]
    InvalidEndpoint(String),
}
