//! Model Context Protocol handshake messages.
//!
//! The legacy HTTP+SSE transport works as follows: the client opens an
//! event stream at `/sse`, the server announces a message URL in an
//! `endpoint` event, the client POSTs JSON-RPC messages to that URL and the
//! server answers on the event stream. A handshake is one `initialize`
//! request, its response, and an `initialized` notification.

use super::HandshakeError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Protocol revision announced in the `initialize` request.
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC identifier of the `initialize` request.
pub const INITIALIZE_REQUEST_ID: u64 = 1;

/// Identity this client announces during the handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientIdentity {
    /// Client name.
    pub name: String,
    /// Client version.
    pub version: String,
}

impl Default for ClientIdentity {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

/// Server facts learned from a completed handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandshakeInfo {
    /// `serverInfo.name` reported by the server.
    pub server_name: String,
    /// `serverInfo.version` reported by the server, empty when absent.
    pub server_version: String,
    /// Protocol revision the server agreed to.
    pub protocol_version: String,
}

/// Builds the JSON-RPC `initialize` request.
#[must_use]
pub fn initialize_request(client: &ClientIdentity) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": INITIALIZE_REQUEST_ID,
        "method": "initialize",
        "params": {
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": {},
            "clientInfo": {
                "name": client.name,
                "version": client.version,
            },
        },
    })
}

/// Builds the JSON-RPC `notifications/initialized` notification.
#[must_use]
pub fn initialized_notification() -> Value {
    json!({
        "jsonrpc": "2.0",
        "method": "notifications/initialized",
    })
}

/// Interprets one message received on the event stream.
///
/// Returns `Ok(None)` for messages unrelated to the `initialize` request,
/// so callers can keep reading.
///
/// # Errors
///
/// Returns [`HandshakeError::Rejected`] when the server answered with a
/// JSON-RPC error, or [`HandshakeError::MissingField`] when the result lacks
/// `protocolVersion` or `serverInfo.name`.
pub fn parse_initialize_response(message: &Value) -> Result<Option<HandshakeInfo>, HandshakeError> {
    let is_response = message.get("id").and_then(Value::as_u64) == Some(INITIALIZE_REQUEST_ID);
    if !is_response {
        return Ok(None);
    }

    if let Some(error) = message.get("error") {
        let detail = error
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| error.to_string(), str::to_owned);
        return Err(HandshakeError::Rejected(detail));
    }

    let result = message
        .get("result")
        .ok_or(HandshakeError::MissingField("result"))?;
    let protocol_version = result
        .get("protocolVersion")
        .and_then(Value::as_str)
        .ok_or(HandshakeError::MissingField("protocolVersion"))?;
    let server_info = result
        .get("serverInfo")
        .ok_or(HandshakeError::MissingField("serverInfo"))?;
    let server_name = server_info
        .get("name")
        .and_then(Value::as_str)
        .ok_or(HandshakeError::MissingField("serverInfo.name"))?;
    let server_version = server_info
        .get("version")
        .and_then(Value::as_str)
        .unwrap_or_default();

    Ok(Some(HandshakeInfo {
        server_name: server_name.to_owned(),
        server_version: server_version.to_owned(),
        protocol_version: protocol_version.to_owned(),
    }))
}
