//! Adapter implementations for the probe transport port.

mod http;
mod memory;

pub use http::HttpProbeTransport;
pub use memory::ScriptedProbeTransport;
