//! Pushes discovered records to the service registry.

use crate::registry::{
    domain::{RegistryServiceName, ServiceRegistration},
    ports::{RegistryClient, RegistryError},
};
use crate::service::domain::{ContainerId, ServiceRecord};
use std::sync::Arc;
use tracing::{debug, error};

/// A registration that did not go through.
#[derive(Debug, Clone)]
pub struct SyncFailure {
    /// Identifier of the record.
    pub id: ContainerId,
    /// Sanitized name the record was registered under.
    pub name: RegistryServiceName,
    /// Error reported by the registry client.
    pub error: RegistryError,
}

/// Outcome of one synchronization pass.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Records registered successfully, in submission order.
    pub registered: Vec<ContainerId>,
    /// Records whose registration failed, in submission order.
    pub failed: Vec<SyncFailure>,
}

impl SyncReport {
    /// Returns the number of registrations attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.registered.len() + self.failed.len()
    }

    /// Returns `true` when every registration succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Registry synchronization service.
///
/// Every record is registered on every pass; the registry treats repeated
/// registrations of an id as updates. Nothing is ever deregistered.
#[derive(Clone)]
pub struct RegistrySynchronizer<R>
where
    R: RegistryClient,
{
    client: Arc<R>,
}

impl<R> RegistrySynchronizer<R>
where
    R: RegistryClient,
{
    /// Creates a synchronizer submitting through `client`.
    #[must_use]
    pub const fn new(client: Arc<R>) -> Self {
        Self { client }
    }

    /// Registers each record, continuing past individual failures.
    pub async fn sync<'a>(
        &self,
        records: impl IntoIterator<Item = &'a ServiceRecord>,
    ) -> SyncReport {
        let mut report = SyncReport::default();

        for record in records {
            let registration = ServiceRegistration::from_record(record);
            match self.client.register(&registration).await {
                Ok(()) => {
                    debug!(
                        service = registration.name().as_str(),
                        protocol = %record.protocol(),
                        "service registration submitted"
                    );
                    report.registered.push(record.id().clone());
                }
                Err(err) => {
                    error!(
                        service = record.name(),
                        id = record.id().short(),
                        error = %err,
                        "failed to register service"
                    );
                    report.failed.push(SyncFailure {
                        id: record.id().clone(),
                        name: registration.name().clone(),
                        error: err,
                    });
                }
            }
        }

        report
    }
}
