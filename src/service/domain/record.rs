//! Service record aggregate.

use super::{ContainerId, ProtocolTag};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One discovered agent service.
///
/// Records are created once, when a container is first classified, and are
/// read-only afterwards: the discovery cache hands out clones and the
/// registry synchronizer only ever borrows them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    id: ContainerId,
    name: String,
    protocol: ProtocolTag,
    host: String,
    port: u16,
    metadata: BTreeMap<String, String>,
    sub_agents: Vec<String>,
}

impl ServiceRecord {
    /// Creates a record with empty metadata and no sub-agents.
    #[must_use]
    pub fn new(
        id: ContainerId,
        name: impl Into<String>,
        protocol: ProtocolTag,
        host: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            protocol,
            host: host.into(),
            port,
            metadata: BTreeMap::new(),
            sub_agents: Vec::new(),
        }
    }

    /// Adds or replaces one metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Adds or replaces several metadata entries.
    #[must_use]
    pub fn with_metadata_entries(
        mut self,
        entries: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        self.metadata.extend(entries);
        self
    }

    /// Replaces the sub-agent list.
    #[must_use]
    pub fn with_sub_agents(mut self, sub_agents: impl IntoIterator<Item = String>) -> Self {
        self.sub_agents = sub_agents.into_iter().collect();
        self
    }

    /// Returns the container identifier.
    #[must_use]
    pub const fn id(&self) -> &ContainerId {
        &self.id
    }

    /// Returns the human-readable service name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the detected protocol.
    #[must_use]
    pub const fn protocol(&self) -> ProtocolTag {
        self.protocol
    }

    /// Returns the host the endpoint was reached on.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port the endpoint was reached on.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns protocol-specific metadata.
    #[must_use]
    pub const fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Returns identifiers of agents fronted by this service.
    #[must_use]
    pub fn sub_agents(&self) -> &[String] {
        &self.sub_agents
    }
}
