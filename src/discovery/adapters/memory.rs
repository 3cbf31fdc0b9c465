//! In-memory container inventory for tests.

use crate::discovery::{
    domain::ContainerSummary,
    ports::{ContainerInventory, InventoryError, InventoryResult},
};
use async_trait::async_trait;
use std::io;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory container inventory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContainerInventory {
    state: Arc<RwLock<InMemoryInventoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryInventoryState {
    containers: Vec<ContainerSummary>,
    failure: Option<String>,
    list_calls: usize,
}

fn lock_error(err: impl ToString) -> InventoryError {
    InventoryError::unavailable(io::Error::other(err.to_string()))
}

impl InMemoryContainerInventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the listed containers.
    ///
    /// # Errors
    ///
    /// Returns inventory errors when lock acquisition fails.
    pub fn set_containers(
        &self,
        containers: impl IntoIterator<Item = ContainerSummary>,
    ) -> InventoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.containers = containers.into_iter().collect();
        Ok(())
    }

    /// Makes every listing fail with `message` until cleared.
    ///
    /// # Errors
    ///
    /// Returns inventory errors when lock acquisition fails.
    pub fn set_unavailable(&self, message: Option<&str>) -> InventoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.failure = message.map(str::to_owned);
        Ok(())
    }

    /// Returns how many times the inventory was listed.
    ///
    /// # Errors
    ///
    /// Returns inventory errors when lock acquisition fails.
    pub fn list_calls(&self) -> InventoryResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.list_calls)
    }
}

#[async_trait]
impl ContainerInventory for InMemoryContainerInventory {
    async fn list_containers(&self) -> InventoryResult<Vec<ContainerSummary>> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.list_calls += 1;
        if let Some(message) = &state.failure {
            return Err(InventoryError::unavailable(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                message.clone(),
            )));
        }
        Ok(state.containers.clone())
    }
}
