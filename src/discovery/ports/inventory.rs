//! Inventory port listing the host's containers.

use crate::discovery::domain::ContainerSummary;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Source of the host's current container set.
#[async_trait]
pub trait ContainerInventory: Send + Sync {
    /// Lists containers, honouring the adapter's inclusion policy for
    /// stopped containers.
    ///
    /// An empty list is a successful result.
    async fn list_containers(&self) -> InventoryResult<Vec<ContainerSummary>>;
}

/// Errors returned by inventory adapters.
#[derive(Debug, Clone, Error)]
pub enum InventoryError {
    /// The container runtime could not be reached.
    #[error("container runtime unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// The container runtime answered with an error status.
    #[error("container runtime returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error body returned by the runtime.
        message: String,
    },

    /// The listing could not be decoded.
    #[error("invalid container listing: {0}")]
    InvalidResponse(Arc<dyn std::error::Error + Send + Sync>),
}

impl InventoryError {
    /// Wraps a connectivity failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Wraps a decoding failure.
    pub fn invalid_response(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidResponse(Arc::new(err))
    }
}
