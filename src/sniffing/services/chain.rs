//! Ordered, first-match-wins sniffer chain.

use super::{StreamingHandshakeSniffer, StructuralApiSniffer};
use crate::service::domain::ProtocolTag;
use crate::sniffing::{
    domain::{ContainerFacts, Detection, Endpoint, NotDetectedReason},
    ports::ProbeTransport,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Slack added on top of a sniffer's own timeout before the chain gives up
/// on it.
const DEADLINE_GRACE: Duration = Duration::from_millis(500);

/// One protocol probe.
///
/// The set of protocols is closed; variants without a fingerprint yet are
/// kept as [`Sniffer::Unimplemented`] so they can be ordered and tested like
/// the others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sniffer {
    /// OpenAPI fingerprinting (`ACP`).
    StructuralApi(StructuralApiSniffer),
    /// SSE handshake (`MCP`).
    StreamingHandshake(StreamingHandshakeSniffer),
    /// Placeholder that never matches.
    Unimplemented(ProtocolTag),
}

impl Sniffer {
    /// Returns the default sniffer for `protocol`.
    #[must_use]
    pub fn for_protocol(protocol: ProtocolTag) -> Self {
        match protocol {
            ProtocolTag::Acp => Self::StructuralApi(StructuralApiSniffer::default()),
            ProtocolTag::Mcp => Self::StreamingHandshake(StreamingHandshakeSniffer::default()),
            ProtocolTag::Ap | ProtocolTag::A2a => Self::Unimplemented(protocol),
        }
    }

    /// Returns the protocol this sniffer confirms.
    #[must_use]
    pub const fn protocol(&self) -> ProtocolTag {
        match self {
            Self::StructuralApi(_) => ProtocolTag::Acp,
            Self::StreamingHandshake(_) => ProtocolTag::Mcp,
            Self::Unimplemented(protocol) => *protocol,
        }
    }

    /// Returns the bound after which the chain abandons this sniffer.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        match self {
            Self::StructuralApi(sniffer) => Some(sniffer.timeout() + DEADLINE_GRACE),
            Self::StreamingHandshake(sniffer) => Some(sniffer.timeout() + DEADLINE_GRACE),
            Self::Unimplemented(_) => None,
        }
    }

    /// Probes `endpoint` for this sniffer's protocol.
    pub async fn probe<T>(
        &self,
        transport: &T,
        endpoint: &Endpoint,
        facts: &ContainerFacts,
    ) -> Detection
    where
        T: ProbeTransport + ?Sized,
    {
        match self {
            Self::StructuralApi(sniffer) => sniffer.probe(transport, endpoint, facts).await,
            Self::StreamingHandshake(sniffer) => sniffer.probe(transport, endpoint, facts).await,
            Self::Unimplemented(protocol) => {
                Detection::NotDetected(NotDetectedReason::Unimplemented(*protocol))
            }
        }
    }
}

/// Runs sniffers in a fixed order and stops at the first match.
///
/// Order is part of the contract: when two protocols could both match an
/// endpoint, the one listed first always wins.
pub struct SnifferChain<T>
where
    T: ProbeTransport,
{
    transport: Arc<T>,
    sniffers: Vec<Sniffer>,
}

impl<T> SnifferChain<T>
where
    T: ProbeTransport,
{
    /// Creates a chain of default sniffers in `order`.
    ///
    /// Repeated protocols are dropped after their first occurrence.
    #[must_use]
    pub fn new(transport: Arc<T>, order: impl IntoIterator<Item = ProtocolTag>) -> Self {
        let mut sniffers: Vec<Sniffer> = Vec::new();
        for protocol in order {
            if sniffers.iter().all(|sniffer| sniffer.protocol() != protocol) {
                sniffers.push(Sniffer::for_protocol(protocol));
            }
        }
        Self::with_sniffers(transport, sniffers)
    }

    /// Creates a chain of default sniffers in [`ProtocolTag::ALL`] order.
    #[must_use]
    pub fn with_default_order(transport: Arc<T>) -> Self {
        Self::new(transport, ProtocolTag::ALL)
    }

    /// Creates a chain from explicitly configured sniffers.
    #[must_use]
    pub const fn with_sniffers(transport: Arc<T>, sniffers: Vec<Sniffer>) -> Self {
        Self {
            transport,
            sniffers,
        }
    }

    /// Returns the configured sniffers in evaluation order.
    #[must_use]
    pub fn sniffers(&self) -> &[Sniffer] {
        &self.sniffers
    }

    /// Classifies `endpoint`, returning the first sniffer match.
    ///
    /// A matched record additionally carries the container facts as
    /// metadata. Exhausting the chain yields
    /// [`NotDetectedReason::ChainExhausted`].
    pub async fn classify(&self, endpoint: &Endpoint, facts: &ContainerFacts) -> Detection {
        for sniffer in &self.sniffers {
            match self.run_sniffer(sniffer, endpoint, facts).await {
                Detection::Detected(record) => {
                    info!(
                        container = facts.id.short(),
                        protocol = %record.protocol(),
                        %endpoint,
                        "detected agent protocol"
                    );
                    return Detection::Detected(
                        record.with_metadata_entries(facts.metadata_entries()),
                    );
                }
                Detection::NotDetected(reason) => {
                    debug!(
                        container = facts.id.short(),
                        sniffer = %sniffer.protocol(),
                        %endpoint,
                        %reason,
                        "sniffer declined"
                    );
                }
            }
        }
        Detection::NotDetected(NotDetectedReason::ChainExhausted)
    }

    async fn run_sniffer(
        &self,
        sniffer: &Sniffer,
        endpoint: &Endpoint,
        facts: &ContainerFacts,
    ) -> Detection {
        let probe = sniffer.probe(&*self.transport, endpoint, facts);
        let Some(deadline) = sniffer.deadline() else {
            return probe.await;
        };
        tokio::time::timeout(deadline, probe)
            .await
            .unwrap_or_else(|_| {
                Detection::NotDetected(NotDetectedReason::Unreachable(format!(
                    "no answer within {deadline:?}"
                )))
            })
    }
}
