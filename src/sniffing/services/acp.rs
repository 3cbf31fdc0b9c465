//! Structural-API sniffer for the Agent Connect Protocol.

use crate::service::domain::{ProtocolTag, ServiceRecord};
use crate::sniffing::{
    domain::{ContainerFacts, Detection, Endpoint, NotDetectedReason, match_acp_document},
    ports::{ProbeTransport, TransportError},
};
use std::time::Duration;

/// Default bound on fetching the OpenAPI document.
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(3);

/// Path of the OpenAPI document on an ACP server.
pub const OPENAPI_PATH: &str = "/openapi.json";

/// Path of the interactive API documentation on an ACP server.
pub const DOCS_PATH: &str = "/docs";

/// Detects ACP servers by fetching and fingerprinting their OpenAPI
/// document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuralApiSniffer {
    timeout: Duration,
}

impl Default for StructuralApiSniffer {
    fn default() -> Self {
        Self::new(DEFAULT_API_TIMEOUT)
    }
}

impl StructuralApiSniffer {
    /// Creates a sniffer with the given fetch timeout.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Returns the fetch timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probes `endpoint` for an ACP OpenAPI document.
    pub async fn probe<T>(
        &self,
        transport: &T,
        endpoint: &Endpoint,
        facts: &ContainerFacts,
    ) -> Detection
    where
        T: ProbeTransport + ?Sized,
    {
        let openapi_url = endpoint.http_url(OPENAPI_PATH);
        let response = match transport.get_json(&openapi_url, self.timeout).await {
            Ok(response) => response,
            Err(err @ TransportError::Decode(_)) => {
                return Detection::NotDetected(NotDetectedReason::MalformedDocument(
                    err.to_string(),
                ));
            }
            Err(err) => {
                return Detection::NotDetected(NotDetectedReason::Unreachable(err.to_string()));
            }
        };

        if !response.is_ok() {
            return Detection::NotDetected(NotDetectedReason::UnexpectedStatus(response.status));
        }

        let document = match match_acp_document(&response.body) {
            Ok(document) => document,
            Err(reason) => return Detection::NotDetected(reason),
        };

        let record = ServiceRecord::new(
            facts.id.clone(),
            facts.name.clone(),
            ProtocolTag::Acp,
            endpoint.host(),
            endpoint.port(),
        )
        .with_metadata("docs_url", endpoint.http_url(DOCS_PATH))
        .with_metadata("openapi_url", openapi_url)
        .with_metadata_entries(
            [("api_title", document.title), ("api_version", document.version)]
                .into_iter()
                .filter_map(|(key, value)| value.map(|text| (key.to_owned(), text))),
        );

        Detection::Detected(record)
    }
}
