//! Container discovery rounds.
//!
//! The [`services::DiscoveryScanner`] lists the host's containers, reuses
//! cached records for containers it already classified, and runs the
//! sniffer chain on the rest. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
