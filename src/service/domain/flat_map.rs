//! Flat string-map encoding of service records.
//!
//! Some registries only store `string -> string` metadata. A record is
//! flattened as follows:
//!
//! | record field    | flat key          | value                          |
//! |-----------------|-------------------|--------------------------------|
//! | `id`            | `id`              | identifier                     |
//! | `name`          | `name`            | name                           |
//! | `protocol`      | `protocol`        | upper-case tag, e.g. `ACP`     |
//! | `host`          | `host`            | host                           |
//! | `port`          | `port`            | decimal port                   |
//! | `metadata[k]`   | `metadata_<k>`    | value                          |
//! | `sub_agents`    | `sub_agents`      | comma-joined, `""` when empty  |
//!
//! Decoding is the exact inverse, with two lenient rules: a malformed port
//! decodes to `0`, and missing optional keys decode to empty values. Both
//! are reported as [`DecodeWarning`]s rather than failing the decode.

use super::{ContainerId, FlatMapDecodeError, ProtocolTag, ServiceRecord};
use std::collections::BTreeMap;
use std::fmt;

/// Flat string-to-string representation of a record.
pub type FlatMap = BTreeMap<String, String>;

/// Prefix applied to every metadata key in the flat encoding.
pub const METADATA_PREFIX: &str = "metadata_";

/// Separator used to join sub-agent identifiers.
pub const SUB_AGENT_SEPARATOR: char = ',';

const ID_KEY: &str = "id";
const NAME_KEY: &str = "name";
const PROTOCOL_KEY: &str = "protocol";
const HOST_KEY: &str = "host";
const PORT_KEY: &str = "port";
const SUB_AGENTS_KEY: &str = "sub_agents";

/// Non-fatal anomaly observed while decoding a flat map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    /// The port value was not a valid port number and decoded to `0`.
    InvalidPort(String),
    /// A reserved key was absent and decoded to its empty value.
    MissingField(&'static str),
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPort(raw) => write!(f, "invalid port value '{raw}', using 0"),
            Self::MissingField(key) => write!(f, "missing field '{key}'"),
        }
    }
}

/// Result of a successful decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    /// The recovered record.
    pub record: ServiceRecord,
    /// Anomalies tolerated while decoding.
    pub warnings: Vec<DecodeWarning>,
}

impl DecodedRecord {
    /// Returns `true` when the decode needed no lenient fallbacks.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

impl ServiceRecord {
    /// Flattens the record into a string map.
    ///
    /// The `sub_agents` key is always present, holding an empty string when
    /// there are no sub-agents.
    #[must_use]
    pub fn to_flat_map(&self) -> FlatMap {
        let mut flat = FlatMap::new();
        flat.insert(ID_KEY.to_owned(), self.id().as_str().to_owned());
        flat.insert(NAME_KEY.to_owned(), self.name().to_owned());
        flat.insert(PROTOCOL_KEY.to_owned(), self.protocol().as_str().to_owned());
        flat.insert(HOST_KEY.to_owned(), self.host().to_owned());
        flat.insert(PORT_KEY.to_owned(), self.port().to_string());

        for (key, value) in self.metadata() {
            flat.insert(format!("{METADATA_PREFIX}{key}"), value.clone());
        }

        let separator = SUB_AGENT_SEPARATOR.to_string();
        flat.insert(SUB_AGENTS_KEY.to_owned(), self.sub_agents().join(&separator));
        flat
    }

    /// Recovers a record from its flat encoding.
    ///
    /// # Errors
    ///
    /// Returns [`FlatMapDecodeError::MissingId`] when `id` is missing or
    /// empty, and [`FlatMapDecodeError::UnknownProtocol`] when `protocol`
    /// does not name a known protocol. Every other anomaly is reported in
    /// [`DecodedRecord::warnings`].
    pub fn from_flat_map(flat: &FlatMap) -> Result<DecodedRecord, FlatMapDecodeError> {
        let mut warnings = Vec::new();

        let id = flat
            .get(ID_KEY)
            .and_then(|raw| ContainerId::new(raw.as_str()).ok())
            .ok_or(FlatMapDecodeError::MissingId)?;
        let protocol = ProtocolTag::try_from(
            flat.get(PROTOCOL_KEY).map_or("", String::as_str),
        )?;

        let name = text_field(flat, NAME_KEY, &mut warnings);
        let host = text_field(flat, HOST_KEY, &mut warnings);
        let port = port_field(flat, &mut warnings);

        let metadata = flat.iter().filter_map(|(key, value)| {
            key.strip_prefix(METADATA_PREFIX)
                .map(|stripped| (stripped.to_owned(), value.clone()))
        });

        let sub_agents = text_field(flat, SUB_AGENTS_KEY, &mut warnings);
        let record = ServiceRecord::new(id, name, protocol, host, port)
            .with_metadata_entries(metadata)
            .with_sub_agents(split_sub_agents(&sub_agents));

        Ok(DecodedRecord { record, warnings })
    }
}

fn text_field(flat: &FlatMap, key: &'static str, warnings: &mut Vec<DecodeWarning>) -> String {
    flat.get(key).cloned().unwrap_or_else(|| {
        warnings.push(DecodeWarning::MissingField(key));
        String::new()
    })
}

fn port_field(flat: &FlatMap, warnings: &mut Vec<DecodeWarning>) -> u16 {
    let Some(raw) = flat.get(PORT_KEY) else {
        warnings.push(DecodeWarning::MissingField(PORT_KEY));
        return 0;
    };
    raw.parse::<u16>().unwrap_or_else(|_| {
        warnings.push(DecodeWarning::InvalidPort(raw.clone()));
        0
    })
}

fn split_sub_agents(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(SUB_AGENT_SEPARATOR).map(str::to_owned).collect()
}
