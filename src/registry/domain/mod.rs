//! Domain model for registry synchronization.
//!
//! Registry-safe names and the registration payload derived from a
//! discovered record.

mod name;
mod registration;

pub use name::{MAX_SERVICE_NAME_LENGTH, RegistryServiceName};
pub use registration::{AGENT_TAG, ServiceRegistration};
