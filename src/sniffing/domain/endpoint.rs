//! Endpoint and container fact value objects.

use crate::service::domain::ContainerId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Network address at which a container's service is reachable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Creates an endpoint.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Builds a plain-HTTP URL for `path` on this endpoint.
    ///
    /// `path` should start with `/`.
    #[must_use]
    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}:{}{path}", self.host, self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Facts about the container behind an endpoint, copied into records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerFacts {
    /// Container identifier.
    pub id: ContainerId,
    /// Primary container name, as reported by the inventory.
    pub name: String,
    /// Image reference the container was created from.
    pub image: String,
    /// Resolved image identifier (digest), empty when unknown.
    pub image_id: String,
}

impl ContainerFacts {
    /// Creates container facts with an unknown image identifier.
    #[must_use]
    pub fn new(id: ContainerId, name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: image.into(),
            image_id: String::new(),
        }
    }

    /// Sets the resolved image identifier.
    #[must_use]
    pub fn with_image_id(mut self, image_id: impl Into<String>) -> Self {
        self.image_id = image_id.into();
        self
    }

    /// Metadata entries every detected record carries.
    ///
    /// `image_id` is omitted when unknown.
    #[must_use]
    pub fn metadata_entries(&self) -> Vec<(String, String)> {
        let mut entries = vec![
            ("container_id".to_owned(), self.id.as_str().to_owned()),
            ("image".to_owned(), self.image.clone()),
        ];
        if !self.image_id.is_empty() {
            entries.push(("image_id".to_owned(), self.image_id.clone()));
        }
        entries
    }
}
