//! Docker Engine API inventory adapter.
//!
//! Lists containers with `GET /containers/json` against a Docker daemon
//! reachable over TCP (`DOCKER_HOST=tcp://...`).

use crate::discovery::{
    domain::{ContainerSummary, ExposedPort},
    ports::{ContainerInventory, InventoryError, InventoryResult},
};
use crate::service::domain::ContainerId;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

/// Container inventory backed by the Docker Engine HTTP API.
#[derive(Debug, Clone)]
pub struct DockerEngineInventory {
    client: Client,
    base_url: String,
    include_stopped: bool,
}

impl DockerEngineInventory {
    /// Creates an inventory for the daemon at `base_url`.
    ///
    /// `base_url` must be an `http://` or `https://` URL; a trailing slash
    /// is ignored.
    #[must_use]
    pub fn new(client: Client, base_url: &str, include_stopped: bool) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            include_stopped,
        }
    }

    /// Returns the daemon base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DockerContainer {
    id: String,
    #[serde(default)]
    names: Vec<String>,
    #[serde(default)]
    image: String,
    #[serde(rename = "ImageID", default)]
    image_id: String,
    #[serde(default)]
    ports: Option<Vec<DockerPort>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DockerPort {
    private_port: u16,
    #[serde(default)]
    public_port: Option<u16>,
    #[serde(rename = "Type", default)]
    kind: String,
}

impl DockerContainer {
    fn into_summary(self) -> Option<ContainerSummary> {
        let Ok(id) = ContainerId::new(self.id) else {
            warn!("ignoring container without an identifier");
            return None;
        };
        let ports = self.ports.unwrap_or_default().into_iter().map(|port| ExposedPort {
            private_port: port.private_port,
            public_port: port.public_port.filter(|public| *public != 0),
            protocol: port.kind,
        });
        Some(
            ContainerSummary::new(id, self.image)
                .with_names(self.names)
                .with_image_id(self.image_id)
                .with_ports(ports),
        )
    }
}

#[async_trait]
impl ContainerInventory for DockerEngineInventory {
    async fn list_containers(&self) -> InventoryResult<Vec<ContainerSummary>> {
        let url = format!(
            "{}/containers/json?all={}",
            self.base_url, self.include_stopped
        );
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(InventoryError::unavailable)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(InventoryError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let containers = response
            .json::<Vec<DockerContainer>>()
            .await
            .map_err(InventoryError::invalid_response)?;

        Ok(containers
            .into_iter()
            .filter_map(DockerContainer::into_summary)
            .collect())
    }
}
