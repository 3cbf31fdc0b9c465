//! Port contracts for registry synchronization.

pub mod client;

pub use client::{RegistryClient, RegistryError, RegistryResult};
