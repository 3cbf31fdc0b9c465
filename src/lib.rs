//! Portolan: agent discovery for container hosts.
//!
//! This crate finds containers on a host that serve an AI agent protocol,
//! identifies which protocol each one speaks, and publishes the results to
//! a service registry so other systems can locate agents by name.
//!
//! # Architecture
//!
//! Portolan follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (Docker, HTTP, Consul)
//!
//! # Modules
//!
//! - [`service`]: Canonical service record and its flat-map encoding
//! - [`sniffing`]: Protocol sniffers and the ordered sniffer chain
//! - [`discovery`]: Container inventory, record cache and discovery rounds
//! - [`registry`]: Registration payloads and registry synchronization
//! - [`config`], [`daemon`], [`telemetry`]: The daemon shell

pub mod config;
pub mod daemon;
pub mod discovery;
pub mod registry;
pub mod service;
pub mod sniffing;
pub mod telemetry;
