//! Port contracts for container discovery.

pub mod inventory;

pub use inventory::{ContainerInventory, InventoryError, InventoryResult};
