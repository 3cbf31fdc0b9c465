//! Streaming-handshake sniffer for the Model Context Protocol.

use crate::service::domain::{ProtocolTag, ServiceRecord};
use crate::sniffing::{
    domain::{ClientIdentity, ContainerFacts, Detection, Endpoint, NotDetectedReason},
    ports::ProbeTransport,
};
use std::time::Duration;

/// Default bound on the whole handshake exchange.
pub const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

/// Well-known path of the MCP event stream.
pub const SSE_PATH: &str = "/sse";

/// Detects MCP servers by completing an `initialize` handshake over SSE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamingHandshakeSniffer {
    timeout: Duration,
    client: ClientIdentity,
}

impl Default for StreamingHandshakeSniffer {
    fn default() -> Self {
        Self::new(DEFAULT_HANDSHAKE_TIMEOUT, ClientIdentity::default())
    }
}

impl StreamingHandshakeSniffer {
    /// Creates a sniffer announcing `client` during the handshake.
    #[must_use]
    pub const fn new(timeout: Duration, client: ClientIdentity) -> Self {
        Self { timeout, client }
    }

    /// Returns the handshake timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probes `endpoint` with an MCP handshake.
    ///
    /// Failures are expected on most containers and are reported as a plain
    /// non-match.
    pub async fn probe<T>(
        &self,
        transport: &T,
        endpoint: &Endpoint,
        facts: &ContainerFacts,
    ) -> Detection
    where
        T: ProbeTransport + ?Sized,
    {
        let sse_url = endpoint.http_url(SSE_PATH);
        let info = match transport
            .mcp_handshake(&sse_url, &self.client, self.timeout)
            .await
        {
            Ok(info) => info,
            Err(err) => {
                return Detection::NotDetected(NotDetectedReason::HandshakeFailed(err.to_string()));
            }
        };

        let name = if info.server_name.trim().is_empty() {
            facts.name.clone()
        } else {
            info.server_name.clone()
        };

        let record = ServiceRecord::new(
            facts.id.clone(),
            name,
            ProtocolTag::Mcp,
            endpoint.host(),
            endpoint.port(),
        )
        .with_metadata("server_name", info.server_name)
        .with_metadata("server_version", info.server_version)
        .with_metadata("protocol_version", info.protocol_version)
        .with_metadata("sse_url", sse_url);

        Detection::Detected(record)
    }
}
