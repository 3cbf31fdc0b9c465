//! Protocol sniffers and the ordered chain that runs them.

mod acp;
mod chain;
mod mcp;

pub use acp::{DEFAULT_API_TIMEOUT, DOCS_PATH, OPENAPI_PATH, StructuralApiSniffer};
pub use chain::{Sniffer, SnifferChain};
pub use mcp::{DEFAULT_HANDSHAKE_TIMEOUT, SSE_PATH, StreamingHandshakeSniffer};
