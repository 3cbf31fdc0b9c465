//! Port contracts for protocol sniffing.
//!
//! Ports define the transport primitives sniffers use to reach endpoints.

pub mod transport;

pub use transport::{JsonResponse, ProbeTransport, TransportError, TransportResult};
