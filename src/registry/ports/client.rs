//! Registry client port.

use crate::registry::domain::ServiceRegistration;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Contract for submitting registrations to a service registry.
///
/// Registering an id that is already known replaces the previous
/// registration. No retries are implied.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Registers or re-registers one service.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the registry cannot be reached or
    /// refuses the registration.
    async fn register(&self, registration: &ServiceRegistration) -> RegistryResult<()>;
}

/// Errors returned by registry client implementations.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// The registry answered with a non-success status.
    #[error("registry rejected registration with status {status}: {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// The registry could not be reached.
    #[error("registry transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl RegistryError {
    /// Wraps a transport-layer failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
