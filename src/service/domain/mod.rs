//! Domain model for discovered agent services.
//!
//! The service domain holds the record aggregate, its identifier and
//! protocol tag value objects, and the flat-map encoding contract. It has no
//! infrastructure dependencies.

mod error;
mod flat_map;
mod ids;
mod protocol;
mod record;

pub use error::{FlatMapDecodeError, ParseProtocolTagError, ServiceDomainError};
pub use flat_map::{DecodeWarning, DecodedRecord, FlatMap, METADATA_PREFIX, SUB_AGENT_SEPARATOR};
pub use ids::ContainerId;
pub use protocol::ProtocolTag;
pub use record::ServiceRecord;
