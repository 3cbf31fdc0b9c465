//! Adapter implementations for the container inventory port.

pub mod docker;
pub mod memory;

pub use docker::DockerEngineInventory;
pub use memory::InMemoryContainerInventory;
