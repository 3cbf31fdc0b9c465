//! Container summaries reported by the inventory.

use crate::service::domain::ContainerId;
use crate::sniffing::domain::{ContainerFacts, Endpoint};
use serde::{Deserialize, Serialize};

/// One port a container exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposedPort {
    /// Port inside the container.
    pub private_port: u16,
    /// Host port the container port is published on, if any.
    pub public_port: Option<u16>,
    /// Transport protocol, e.g. `tcp`.
    pub protocol: String,
}

impl ExposedPort {
    /// Creates an unpublished TCP port.
    #[must_use]
    pub fn tcp(private_port: u16) -> Self {
        Self {
            private_port,
            public_port: None,
            protocol: "tcp".to_owned(),
        }
    }

    /// Publishes the port on `public_port`.
    #[must_use]
    pub fn published_on(mut self, public_port: u16) -> Self {
        self.public_port = Some(public_port);
        self
    }

    /// Returns the host port this port is published on.
    ///
    /// Unpublished ports are only reachable from the container's own
    /// network, so they yield `None`.
    #[must_use]
    pub fn published_port(&self) -> Option<u16> {
        self.public_port.filter(|port| *port != 0)
    }
}

/// Snapshot of one container as reported by the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSummary {
    id: ContainerId,
    names: Vec<String>,
    image: String,
    image_id: String,
    ports: Vec<ExposedPort>,
}

impl ContainerSummary {
    /// Creates a summary with no names and no ports.
    #[must_use]
    pub fn new(id: ContainerId, image: impl Into<String>) -> Self {
        Self {
            id,
            names: Vec::new(),
            image: image.into(),
            image_id: String::new(),
            ports: Vec::new(),
        }
    }

    /// Sets the container names.
    #[must_use]
    pub fn with_names(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.names = names.into_iter().collect();
        self
    }

    /// Sets the resolved image identifier.
    #[must_use]
    pub fn with_image_id(mut self, image_id: impl Into<String>) -> Self {
        self.image_id = image_id.into();
        self
    }

    /// Sets the exposed ports.
    #[must_use]
    pub fn with_ports(mut self, ports: impl IntoIterator<Item = ExposedPort>) -> Self {
        self.ports = ports.into_iter().collect();
        self
    }

    /// Returns the container identifier.
    #[must_use]
    pub const fn id(&self) -> &ContainerId {
        &self.id
    }

    /// Returns every name the container is known by.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the first name, or the identifier for unnamed containers.
    #[must_use]
    pub fn primary_name(&self) -> &str {
        self.names.first().map_or(self.id.as_str(), String::as_str)
    }

    /// Returns the image reference.
    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Returns the resolved image identifier.
    #[must_use]
    pub fn image_id(&self) -> &str {
        &self.image_id
    }

    /// Returns the exposed ports.
    #[must_use]
    pub fn ports(&self) -> &[ExposedPort] {
        &self.ports
    }

    /// Resolves the endpoint to probe on `host`.
    ///
    /// Only the first published port is probed. Returns `None` when no port
    /// is published on the host.
    #[must_use]
    pub fn endpoint(&self, host: &str) -> Option<Endpoint> {
        self.ports
            .iter()
            .find_map(ExposedPort::published_port)
            .map(|port| Endpoint::new(host, port))
    }

    /// Returns the facts sniffers copy into detected records.
    #[must_use]
    pub fn facts(&self) -> ContainerFacts {
        ContainerFacts::new(self.id.clone(), self.primary_name(), self.image.clone())
            .with_image_id(self.image_id.clone())
    }
}
