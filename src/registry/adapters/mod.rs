//! Adapter implementations for the registry client port.

pub mod consul;
pub mod memory;

pub use consul::ConsulRegistryClient;
pub use memory::InMemoryRegistry;
