//! Unit tests for registry synchronization.

use std::sync::Arc;

use crate::registry::{
    adapters::InMemoryRegistry,
    domain::ServiceRegistration,
    ports::{RegistryError, client::MockRegistryClient},
    services::RegistrySynchronizer,
};
use crate::service::domain::{ContainerId, ProtocolTag, ServiceRecord};
use rstest::{fixture, rstest};

fn id(raw: &str) -> ContainerId {
    ContainerId::new(raw).expect("valid id")
}

fn record(raw_id: &str, name: &str) -> ServiceRecord {
    ServiceRecord::new(id(raw_id), name, ProtocolTag::Acp, "localhost", 8000)
}

#[fixture]
fn records() -> Vec<ServiceRecord> {
    vec![
        record("aaa", "/first agent"),
        record("bbb", "/second agent"),
        record("ccc", "/third agent"),
    ]
}

#[rstest]
#[tokio::test]
async fn one_failure_does_not_stop_the_pass(records: Vec<ServiceRecord>) {
    let mut client = MockRegistryClient::new();
    client
        .expect_register()
        .times(3)
        .returning(|registration: &ServiceRegistration| {
            if registration.id().as_str() == "bbb" {
                Err(RegistryError::Rejected {
                    status: 500,
                    message: "registry unavailable".to_owned(),
                })
            } else {
                Ok(())
            }
        });
    let synchronizer = RegistrySynchronizer::new(Arc::new(client));

    let report = synchronizer.sync(&records).await;

    assert_eq!(report.registered, vec![id("aaa"), id("ccc")]);
    assert_eq!(report.failed.len(), 1);
    let failure = report.failed.first().expect("one failure");
    assert_eq!(failure.id, id("bbb"));
    assert_eq!(failure.name.as_str(), "second-agent");
    assert!(matches!(
        failure.error,
        RegistryError::Rejected { status: 500, .. }
    ));
    assert_eq!(report.attempted(), 3);
    assert!(!report.is_clean());
}

#[rstest]
#[tokio::test]
async fn registrations_use_sanitized_names() {
    let mut client = MockRegistryClient::new();
    client
        .expect_register()
        .withf(|registration: &ServiceRegistration| {
            registration.name().as_str() == "agent-one"
                && registration.tags().iter().any(|tag| tag == "acp")
        })
        .times(1)
        .returning(|_| Ok(()));
    let synchronizer = RegistrySynchronizer::new(Arc::new(client));

    let report = synchronizer.sync(&[record("aaa", "/agent one!!")]).await;

    assert!(report.is_clean());
}

#[rstest]
#[tokio::test]
async fn empty_pass_submits_nothing() {
    let client = MockRegistryClient::new();
    let synchronizer = RegistrySynchronizer::new(Arc::new(client));

    let report = synchronizer.sync(std::iter::empty()).await;

    assert_eq!(report.attempted(), 0);
    assert!(report.is_clean());
}

#[rstest]
#[tokio::test]
async fn repeated_passes_update_in_place(records: Vec<ServiceRecord>) {
    let registry = Arc::new(InMemoryRegistry::new());
    let synchronizer = RegistrySynchronizer::new(registry.clone());

    synchronizer.sync(&records).await;
    let report = synchronizer.sync(&records).await;

    assert!(report.is_clean());
    assert_eq!(registry.register_calls().expect("calls"), 6);
    assert_eq!(registry.registrations().expect("registrations").len(), 3);
}

#[rstest]
#[tokio::test]
async fn rejected_ids_are_reported_by_the_in_memory_registry(records: Vec<ServiceRecord>) {
    let registry = Arc::new(InMemoryRegistry::new());
    registry.reject(id("ccc")).expect("reject");
    let synchronizer = RegistrySynchronizer::new(registry.clone());

    let report = synchronizer.sync(&records).await;

    assert_eq!(report.registered, vec![id("aaa"), id("bbb")]);
    assert_eq!(report.failed.len(), 1);
    assert!(registry.get(&id("ccc")).expect("lookup").is_none());
    assert_eq!(
        registry
            .get(&id("aaa"))
            .expect("lookup")
            .map(|registration| registration.name().as_str().to_owned()),
        Some("first-agent".to_owned())
    );
}
