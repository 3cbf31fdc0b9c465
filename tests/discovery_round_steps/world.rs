//! Shared world state for discovery round BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use portolan::{
    daemon::{Daemon, DaemonError, RoundOutcome},
    discovery::{
        adapters::InMemoryContainerInventory,
        domain::{ContainerSummary, DiscoveryCache},
        services::DiscoveryScanner,
    },
    registry::{adapters::InMemoryRegistry, services::RegistrySynchronizer},
    sniffing::{adapters::ScriptedProbeTransport, services::SnifferChain},
};
use rstest::fixture;
use std::time::Duration;

/// Daemon type used by the BDD world.
pub type TestDaemon =
    Daemon<InMemoryContainerInventory, ScriptedProbeTransport, InMemoryRegistry, DefaultClock>;

/// Scenario world for discovery round behaviour tests.
pub struct DiscoveryWorld {
    /// Container inventory the daemon lists.
    pub inventory: Arc<InMemoryContainerInventory>,
    /// Scripted transport answering sniffer probes.
    pub transport: Arc<ScriptedProbeTransport>,
    /// Registry receiving registrations.
    pub registry: Arc<InMemoryRegistry>,
    /// The daemon under test.
    pub daemon: TestDaemon,
    /// Containers queued for the inventory.
    pub containers: Vec<ContainerSummary>,
    /// Result of the last round.
    pub last_outcome: Option<Result<RoundOutcome, DaemonError>>,
}

impl DiscoveryWorld {
    /// Creates a world with an empty inventory and registry.
    #[must_use]
    pub fn new() -> Self {
        let inventory = Arc::new(InMemoryContainerInventory::new());
        let transport = Arc::new(ScriptedProbeTransport::new());
        let registry = Arc::new(InMemoryRegistry::new());
        let scanner = DiscoveryScanner::new(
            inventory.clone(),
            Arc::new(SnifferChain::with_default_order(transport.clone())),
            Arc::new(DiscoveryCache::new()),
            Arc::new(DefaultClock),
        );
        let daemon = Daemon::new(
            scanner,
            RegistrySynchronizer::new(registry.clone()),
            Duration::from_secs(10),
        );
        Self {
            inventory,
            transport,
            registry,
            daemon,
            containers: Vec::new(),
            last_outcome: None,
        }
    }
}

impl Default for DiscoveryWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DiscoveryWorld {
    DiscoveryWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Returns the URL prefix of every probe sent to `port`.
pub fn probe_prefix(port: u16) -> String {
    format!("http://localhost:{port}/")
}
