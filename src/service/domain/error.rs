//! Error types for service domain validation and decoding.

use thiserror::Error;

/// Errors returned while constructing service domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceDomainError {
    /// The container identifier is empty after trimming.
    #[error("container identifier must not be empty")]
    EmptyContainerId,
}

/// Error returned while parsing a protocol tag.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown protocol tag: {0}")]
pub struct ParseProtocolTagError(pub String);

/// Fatal errors returned while decoding a flat map into a record.
///
/// Recoverable anomalies are reported as
/// [`DecodeWarning`](super::DecodeWarning)s instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlatMapDecodeError {
    /// The `id` entry is missing or empty.
    #[error("flat map has no usable `id` entry")]
    MissingId,

    /// The `protocol` entry does not name a known protocol.
    #[error(transparent)]
    UnknownProtocol(#[from] ParseProtocolTagError),
}
