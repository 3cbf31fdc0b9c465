//! Then steps for discovery round BDD scenarios.

use super::world::{DiscoveryWorld, probe_prefix};
use portolan::daemon::{DaemonError, RoundOutcome};
use portolan::discovery::services::DiscoveryError;
use rstest_bdd_macros::then;

fn outcome(world: &DiscoveryWorld) -> Result<&RoundOutcome, eyre::Report> {
    match world.last_outcome.as_ref() {
        Some(Ok(outcome)) => Ok(outcome),
        Some(Err(err)) => Err(eyre::eyre!("round failed: {err}")),
        None => Err(eyre::eyre!("no round has run in scenario world")),
    }
}

fn probes(world: &DiscoveryWorld) -> Result<Vec<String>, eyre::Report> {
    world
        .transport
        .requests()
        .map_err(|err| eyre::eyre!("read probe log: {err}"))
}

#[then("the number of discovered records is {count:usize}")]
fn discovered_count(world: &DiscoveryWorld, count: usize) -> Result<(), eyre::Report> {
    let found = outcome(world)?.round.len();
    if found != count {
        return Err(eyre::eyre!("expected {count} records, found {found}"));
    }
    Ok(())
}

#[then(r#"the registry holds "{name}" tagged "{tag}""#)]
fn registry_holds(world: &DiscoveryWorld, name: String, tag: String) -> Result<(), eyre::Report> {
    let registrations = world
        .registry
        .registrations()
        .map_err(|err| eyre::eyre!("read registry: {err}"))?;
    let registration = registrations
        .iter()
        .find(|registration| registration.name().as_str() == name)
        .ok_or_else(|| eyre::eyre!("expected registration named '{name}'"))?;
    if !registration.tags().contains(&tag) {
        return Err(eyre::eyre!(
            "expected tag '{tag}', found {:?}",
            registration.tags()
        ));
    }
    Ok(())
}

#[then("no endpoint was probed")]
fn nothing_probed(world: &DiscoveryWorld) -> Result<(), eyre::Report> {
    let sent = probes(world)?;
    if !sent.is_empty() {
        return Err(eyre::eyre!("expected no probes, found {sent:?}"));
    }
    Ok(())
}

#[then("port {port:u16} was probed {count:usize} times")]
fn port_probed(world: &DiscoveryWorld, port: u16, count: usize) -> Result<(), eyre::Report> {
    let prefix = probe_prefix(port);
    let sent = probes(world)?
        .into_iter()
        .filter(|url| url.starts_with(&prefix))
        .count();
    if sent != count {
        return Err(eyre::eyre!("expected {count} probes on port {port}, found {sent}"));
    }
    Ok(())
}

#[then("{registered:usize} registration succeeds and {failed:usize} fails")]
fn registration_split(
    world: &DiscoveryWorld,
    registered: usize,
    failed: usize,
) -> Result<(), eyre::Report> {
    let sync = &outcome(world)?.sync;
    if sync.registered.len() != registered || sync.failed.len() != failed {
        return Err(eyre::eyre!(
            "expected {registered} registered and {failed} failed, found {} and {}",
            sync.registered.len(),
            sync.failed.len()
        ));
    }
    Ok(())
}

#[then("the round fails with an inventory error")]
fn round_fails_with_inventory_error(world: &DiscoveryWorld) -> Result<(), eyre::Report> {
    match world.last_outcome.as_ref() {
        Some(Err(DaemonError::Discovery(DiscoveryError::Inventory(_)))) => Ok(()),
        other => Err(eyre::eyre!("expected inventory error, got {other:?}")),
    }
}
