//! In-memory registry for tests and dry runs.

use crate::registry::{
    domain::ServiceRegistration,
    ports::{RegistryClient, RegistryError, RegistryResult},
};
use crate::service::domain::ContainerId;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory service registry.
///
/// Registrations are keyed by id, so re-registering replaces the previous
/// entry. Individual ids can be made to fail.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    state: Arc<RwLock<InMemoryRegistryState>>,
}

#[derive(Debug, Default)]
struct InMemoryRegistryState {
    services: BTreeMap<ContainerId, ServiceRegistration>,
    rejected: HashSet<ContainerId>,
    register_calls: usize,
}

fn lock_error(err: impl ToString) -> RegistryError {
    RegistryError::transport(std::io::Error::other(err.to_string()))
}

impl InMemoryRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every registration of `id` fail.
    ///
    /// # Errors
    ///
    /// Returns registry errors when lock acquisition fails.
    pub fn reject(&self, id: ContainerId) -> RegistryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.rejected.insert(id);
        Ok(())
    }

    /// Returns the stored registrations ordered by id.
    ///
    /// # Errors
    ///
    /// Returns registry errors when lock acquisition fails.
    pub fn registrations(&self) -> RegistryResult<Vec<ServiceRegistration>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.services.values().cloned().collect())
    }

    /// Returns the registration stored for `id`.
    ///
    /// # Errors
    ///
    /// Returns registry errors when lock acquisition fails.
    pub fn get(&self, id: &ContainerId) -> RegistryResult<Option<ServiceRegistration>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.services.get(id).cloned())
    }

    /// Returns how many registrations were attempted.
    ///
    /// # Errors
    ///
    /// Returns registry errors when lock acquisition fails.
    pub fn register_calls(&self) -> RegistryResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.register_calls)
    }
}

#[async_trait]
impl RegistryClient for InMemoryRegistry {
    async fn register(&self, registration: &ServiceRegistration) -> RegistryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.register_calls += 1;

        if state.rejected.contains(registration.id()) {
            return Err(RegistryError::Rejected {
                status: 500,
                message: format!("registration of {} rejected", registration.id()),
            });
        }

        state
            .services
            .insert(registration.id().clone(), registration.clone());
        Ok(())
    }
}
