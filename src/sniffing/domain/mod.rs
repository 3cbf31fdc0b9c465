//! Domain model for protocol sniffing.
//!
//! Endpoints, container facts, detection outcomes and the pure parts of the
//! protocol fingerprints (OpenAPI path matching and the MCP handshake
//! messages) live here, free of any transport.

mod detection;
mod endpoint;
mod error;
mod handshake;
mod openapi;

pub use detection::{Detection, NotDetectedReason};
pub use endpoint::{ContainerFacts, Endpoint};
pub use error::HandshakeError;
pub use handshake::{
    ClientIdentity, HandshakeInfo, INITIALIZE_REQUEST_ID, MCP_PROTOCOL_VERSION,
    initialize_request, initialized_notification, parse_initialize_response,
};
pub use openapi::{AcpDocument, REQUIRED_ACP_PATHS, match_acp_document};
