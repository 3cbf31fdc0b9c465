//! Unit tests for building registrations from records.

use crate::registry::domain::{AGENT_TAG, ServiceRegistration};
use crate::service::domain::{ContainerId, ProtocolTag, ServiceRecord};
use rstest::rstest;

fn record(name: &str, protocol: ProtocolTag) -> ServiceRecord {
    let id = ContainerId::new("9d1c0ffee000").expect("valid id");
    ServiceRecord::new(id, name, protocol, "localhost", 8000)
        .with_metadata("docs_url", "http://localhost:8000/docs")
}

#[rstest]
fn registration_carries_record_identity_and_address() {
    let source = record("/agent one!!", ProtocolTag::Acp);
    let registration = ServiceRegistration::from_record(&source);

    assert_eq!(registration.id(), source.id());
    assert_eq!(registration.name().as_str(), "agent-one");
    assert_eq!(registration.host(), "localhost");
    assert_eq!(registration.port(), 8000);
}

#[rstest]
#[case(ProtocolTag::Acp, "acp")]
#[case(ProtocolTag::Mcp, "mcp")]
#[case(ProtocolTag::A2a, "a2a")]
fn registration_is_tagged_as_agent_and_protocol(
    #[case] protocol: ProtocolTag,
    #[case] expected: &str,
) {
    let registration = ServiceRegistration::from_record(&record("svc", protocol));
    assert_eq!(registration.tags(), [AGENT_TAG.to_owned(), expected.to_owned()]);
}

#[rstest]
fn registration_meta_is_the_flat_record() {
    let source = record("svc", ProtocolTag::Mcp);
    let registration = ServiceRegistration::from_record(&source);

    assert_eq!(registration.meta(), &source.to_flat_map());
    assert_eq!(
        registration.meta().get("name").map(String::as_str),
        Some("svc")
    );
}

#[rstest]
fn unsanitizable_names_fall_back_to_the_id() {
    let registration = ServiceRegistration::from_record(&record("!!!", ProtocolTag::Acp));
    assert_eq!(registration.name().as_str(), "9d1c0ffee000");
}
