//! Protocol sniffing for container endpoints.
//!
//! A [`services::SnifferChain`] probes one endpoint with an ordered list of
//! [`services::Sniffer`]s and reports the first protocol that matches. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Probing services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
