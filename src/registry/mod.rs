//! Service registry synchronization.
//!
//! Discovered records are translated into [`domain::ServiceRegistration`]s
//! and pushed to an external registry through the
//! [`ports::RegistryClient`] port. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Synchronization services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
