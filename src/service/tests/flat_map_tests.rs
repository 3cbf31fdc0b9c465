//! Unit tests for the flat-map encoding of service records.

use crate::service::domain::{
    ContainerId, DecodeWarning, FlatMap, FlatMapDecodeError, ProtocolTag, ServiceRecord,
};
use rstest::{fixture, rstest};

#[fixture]
fn record() -> ServiceRecord {
    let id = ContainerId::new("4f2a9c1be7d0").expect("valid id");
    ServiceRecord::new(id, "/echo-agent", ProtocolTag::Acp, "localhost", 8000)
        .with_metadata("image", "agents/echo:1.0")
        .with_metadata("docs_url", "http://localhost:8000/docs")
        .with_metadata("note", "")
        .with_sub_agents(["alpha".to_owned(), "beta".to_owned()])
}

fn flat(entries: &[(&str, &str)]) -> FlatMap {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect()
}

#[rstest]
fn encoding_uses_reserved_and_prefixed_keys(record: ServiceRecord) {
    let encoded = record.to_flat_map();

    let expected = flat(&[
        ("id", "4f2a9c1be7d0"),
        ("name", "/echo-agent"),
        ("protocol", "ACP"),
        ("host", "localhost"),
        ("port", "8000"),
        ("metadata_image", "agents/echo:1.0"),
        ("metadata_docs_url", "http://localhost:8000/docs"),
        ("metadata_note", ""),
        ("sub_agents", "alpha,beta"),
    ]);
    assert_eq!(encoded, expected);
}

#[rstest]
fn empty_sub_agents_encode_to_present_empty_key() {
    let id = ContainerId::new("c1").expect("valid id");
    let encoded = ServiceRecord::new(id, "n", ProtocolTag::Mcp, "h", 1).to_flat_map();
    assert_eq!(encoded.get("sub_agents").map(String::as_str), Some(""));
}

#[rstest]
fn decoding_reverses_encoding(record: ServiceRecord) {
    let decoded = ServiceRecord::from_flat_map(&record.to_flat_map()).expect("decodes");
    assert!(decoded.is_clean());
    assert_eq!(decoded.record, record);
}

#[rstest]
#[case(Vec::new())]
#[case(vec![String::from("solo")])]
#[case(vec![String::from("a"), String::from("b"), String::from("c")])]
fn sub_agents_survive_the_round_trip(#[case] sub_agents: Vec<String>) {
    let id = ContainerId::new("c1").expect("valid id");
    let original = ServiceRecord::new(id, "n", ProtocolTag::A2a, "h", 9)
        .with_sub_agents(sub_agents.clone());

    let decoded = ServiceRecord::from_flat_map(&original.to_flat_map()).expect("decodes");

    assert_eq!(decoded.record.sub_agents(), sub_agents.as_slice());
}

#[rstest]
fn missing_sub_agents_key_decodes_to_empty_with_warning() {
    let map = flat(&[
        ("id", "c1"),
        ("name", "n"),
        ("protocol", "MCP"),
        ("host", "h"),
        ("port", "1"),
    ]);

    let decoded = ServiceRecord::from_flat_map(&map).expect("decodes");

    assert!(decoded.record.sub_agents().is_empty());
    assert_eq!(
        decoded.warnings,
        vec![DecodeWarning::MissingField("sub_agents")]
    );
}

#[rstest]
#[case("not-a-port")]
#[case("70000")]
#[case("-1")]
#[case("")]
fn malformed_port_decodes_to_zero_with_warning(#[case] raw_port: &str) {
    let map = flat(&[
        ("id", "c1"),
        ("name", "n"),
        ("protocol", "ACP"),
        ("host", "h"),
        ("port", raw_port),
        ("metadata_image", "img"),
        ("sub_agents", ""),
    ]);

    let decoded = ServiceRecord::from_flat_map(&map).expect("decodes despite bad port");

    assert_eq!(decoded.record.port(), 0);
    assert_eq!(
        decoded.record.metadata().get("image").map(String::as_str),
        Some("img")
    );
    assert_eq!(
        decoded.warnings,
        vec![DecodeWarning::InvalidPort(raw_port.to_owned())]
    );
}

#[rstest]
#[case(flat(&[("protocol", "ACP")]))]
#[case(flat(&[("id", ""), ("protocol", "ACP")]))]
fn missing_id_is_fatal(#[case] map: FlatMap) {
    assert_eq!(
        ServiceRecord::from_flat_map(&map),
        Err(FlatMapDecodeError::MissingId)
    );
}

#[rstest]
#[case(flat(&[("id", "c1"), ("protocol", "SMTP")]))]
#[case(flat(&[("id", "c1"), ("protocol", "")]))]
#[case(flat(&[("id", "c1"), ("port", "8000")]))]
fn unknown_protocol_is_fatal(#[case] map: FlatMap) {
    assert!(matches!(
        ServiceRecord::from_flat_map(&map),
        Err(FlatMapDecodeError::UnknownProtocol(_))
    ));
}

#[rstest]
fn unprefixed_unknown_keys_are_ignored(record: ServiceRecord) {
    let mut map = record.to_flat_map();
    map.insert("registered_by".to_owned(), "someone-else".to_owned());

    let decoded = ServiceRecord::from_flat_map(&map).expect("decodes");

    assert_eq!(decoded.record, record);
}

mod properties {
    use crate::service::domain::{ContainerId, ProtocolTag, ServiceRecord};
    use proptest::collection::{btree_map, vec};
    use proptest::prelude::*;
    use proptest::sample::select;

    prop_compose! {
        fn arbitrary_record()(
            id in "[0-9a-f]{1,64}",
            name in any::<String>(),
            protocol in select(ProtocolTag::ALL.to_vec()),
            host in any::<String>(),
            port in any::<u16>(),
            metadata in btree_map(any::<String>(), any::<String>(), 0..4),
            sub_agents in vec("[a-z0-9-]{1,12}", 0..4),
        ) -> ServiceRecord {
            let container_id = ContainerId::new(id).expect("generated ids are non-empty");
            ServiceRecord::new(container_id, name, protocol, host, port)
                .with_metadata_entries(metadata)
                .with_sub_agents(sub_agents)
        }
    }

    proptest! {
        #[test]
        fn any_record_survives_the_flat_map(record in arbitrary_record()) {
            let decoded = ServiceRecord::from_flat_map(&record.to_flat_map())
                .expect("encoded records decode");
            prop_assert!(decoded.is_clean());
            prop_assert_eq!(decoded.record, record);
        }
    }
}
