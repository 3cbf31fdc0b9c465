//! Registration payload submitted to the service registry.

use super::RegistryServiceName;
use crate::service::domain::{ContainerId, FlatMap, ServiceRecord};
use serde::{Deserialize, Serialize};

/// Tag attached to every registration so agents can be listed together.
pub const AGENT_TAG: &str = "agent";

/// One service registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRegistration {
    id: ContainerId,
    name: RegistryServiceName,
    host: String,
    port: u16,
    tags: Vec<String>,
    meta: FlatMap,
}

impl ServiceRegistration {
    /// Builds the registration for a discovered record.
    ///
    /// The record id is the registry id. Tags are [`AGENT_TAG`] plus the
    /// lower-case protocol, and the whole record is attached as flat
    /// metadata. A name that sanitizes to nothing falls back to the id.
    #[must_use]
    pub fn from_record(record: &ServiceRecord) -> Self {
        let sanitized = RegistryServiceName::sanitize(record.name());
        let name = if sanitized.is_empty() {
            RegistryServiceName::sanitize(record.id().as_str())
        } else {
            sanitized
        };

        Self {
            id: record.id().clone(),
            name,
            host: record.host().to_owned(),
            port: record.port(),
            tags: vec![
                AGENT_TAG.to_owned(),
                record.protocol().as_str().to_ascii_lowercase(),
            ],
            meta: record.to_flat_map(),
        }
    }

    /// Returns the registry identifier.
    #[must_use]
    pub const fn id(&self) -> &ContainerId {
        &self.id
    }

    /// Returns the sanitized service name.
    #[must_use]
    pub const fn name(&self) -> &RegistryServiceName {
        &self.name
    }

    /// Returns the service address.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the service port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the registry tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the flat-map metadata.
    #[must_use]
    pub const fn meta(&self) -> &FlatMap {
        &self.meta
    }
}
