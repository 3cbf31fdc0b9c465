//! Transport port used by sniffers to reach container endpoints.

use crate::sniffing::domain::{ClientIdentity, HandshakeError, HandshakeInfo};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for probe transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Status and decoded body of an HTTP GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded JSON body. `Value::Null` for non-success statuses, whose
    /// bodies are not read.
    pub body: Value,
}

impl JsonResponse {
    /// Creates a response.
    #[must_use]
    pub const fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Returns `true` for `200 OK`.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Bounded-timeout network primitives used by sniffers.
#[async_trait]
pub trait ProbeTransport: Send + Sync {
    /// Fetches `url` and decodes a successful body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Timeout`] when `timeout` elapses,
    /// [`TransportError::Connect`] when the endpoint is unreachable, and
    /// [`TransportError::Decode`] when a successful body is not JSON.
    async fn get_json(&self, url: &str, timeout: Duration) -> TransportResult<JsonResponse>;

    /// Performs an MCP handshake against the event stream at `sse_url`.
    ///
    /// The whole exchange, including connecting, is bounded by `timeout`,
    /// and the stream is closed before returning.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Timeout`], [`TransportError::Connect`], or
    /// [`TransportError::Handshake`] when the exchange does not complete.
    async fn mcp_handshake(
        &self,
        sse_url: &str,
        client: &ClientIdentity,
        timeout: Duration,
    ) -> TransportResult<HandshakeInfo>;
}

/// Errors returned by probe transport adapters.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The operation did not finish in time.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The endpoint could not be reached.
    #[error("connection failed: {0}")]
    Connect(Arc<dyn std::error::Error + Send + Sync>),

    /// A response body could not be decoded.
    #[error("undecodable response: {0}")]
    Decode(Arc<dyn std::error::Error + Send + Sync>),

    /// The endpoint answered with an unexpected HTTP status.
    #[error("unexpected status {0}")]
    Status(u16),

    /// The handshake exchange failed.
    #[error(transparent)]
    Handshake(#[from] HandshakeError),
}

impl TransportError {
    /// Wraps a connection failure.
    pub fn connect(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Connect(Arc::new(err))
    }

    /// Wraps a decoding failure.
    pub fn decode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Decode(Arc::new(err))
    }
}
