//! Consul agent HTTP API registry adapter.

use crate::registry::{
    domain::ServiceRegistration,
    ports::{RegistryClient, RegistryError, RegistryResult},
};
use crate::service::domain::FlatMap;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::info;

const REGISTER_PATH: &str = "/v1/agent/service/register";

/// Registry client for a local Consul agent.
#[derive(Debug, Clone)]
pub struct ConsulRegistryClient {
    client: Client,
    base_url: String,
}

impl ConsulRegistryClient {
    /// Creates a client for the agent at `base_url`, e.g.
    /// `http://localhost:8500`.
    #[must_use]
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Returns the agent base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct AgentServiceRegistration<'a> {
    #[serde(rename = "ID")]
    id: &'a str,
    name: &'a str,
    address: &'a str,
    port: u16,
    tags: &'a [String],
    meta: &'a FlatMap,
}

impl<'a> From<&'a ServiceRegistration> for AgentServiceRegistration<'a> {
    fn from(registration: &'a ServiceRegistration) -> Self {
        Self {
            id: registration.id().as_str(),
            name: registration.name().as_str(),
            address: registration.host(),
            port: registration.port(),
            tags: registration.tags(),
            meta: registration.meta(),
        }
    }
}

#[async_trait]
impl RegistryClient for ConsulRegistryClient {
    async fn register(&self, registration: &ServiceRegistration) -> RegistryResult<()> {
        let url = format!("{}{REGISTER_PATH}", self.base_url);
        let response = self
            .client
            .put(&url)
            .json(&AgentServiceRegistration::from(registration))
            .send()
            .await
            .map_err(RegistryError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RegistryError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        info!(
            service = registration.name().as_str(),
            id = registration.id().short(),
            "registered service with Consul"
        );
        Ok(())
    }
}
