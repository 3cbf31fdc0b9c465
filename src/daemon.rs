//! Timer-driven discovery and registration loop.
//!
//! One round is a discovery scan followed by a registry sync of the round's
//! records. Rounds never overlap: a slow round delays the next tick instead
//! of queueing extra ones.

use crate::config::DaemonConfig;
use crate::discovery::{
    adapters::DockerEngineInventory,
    domain::{DiscoveryCache, DiscoveryRound},
    ports::ContainerInventory,
    services::{DiscoveryError, DiscoveryScanner},
};
use crate::registry::{
    adapters::ConsulRegistryClient,
    ports::RegistryClient,
    services::{RegistrySynchronizer, SyncReport},
};
use crate::sniffing::{adapters::HttpProbeTransport, ports::ProbeTransport, services::SnifferChain};
use mockable::{Clock, DefaultClock};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

/// Timeout applied to Docker and Consul API calls.
pub const API_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised by the daemon.
#[derive(Debug, Error)]
pub enum DaemonError {
    /// The round's discovery scan failed.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// An HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(Arc<dyn std::error::Error + Send + Sync>),
}

impl DaemonError {
    /// Wraps an HTTP client construction failure.
    pub fn client(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Client(Arc::new(err))
    }
}

/// Result type for daemon operations.
pub type DaemonResult<T> = Result<T, DaemonError>;

/// What one round discovered and registered.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    /// Records found by the scan.
    pub round: DiscoveryRound,
    /// Registration results for those records.
    pub sync: SyncReport,
}

/// Daemon wired to Docker, the HTTP sniffers and Consul.
pub type HttpDaemon =
    Daemon<DockerEngineInventory, HttpProbeTransport, ConsulRegistryClient, DefaultClock>;

/// Discovery and registration loop.
pub struct Daemon<I, T, R, C>
where
    I: ContainerInventory,
    T: ProbeTransport,
    R: RegistryClient,
    C: Clock + Send + Sync,
{
    scanner: DiscoveryScanner<I, T, C>,
    synchronizer: RegistrySynchronizer<R>,
    interval: Duration,
}

impl<I, T, R, C> Daemon<I, T, R, C>
where
    I: ContainerInventory,
    T: ProbeTransport,
    R: RegistryClient,
    C: Clock + Send + Sync,
{
    /// Creates a daemon ticking every `interval`.
    #[must_use]
    pub const fn new(
        scanner: DiscoveryScanner<I, T, C>,
        synchronizer: RegistrySynchronizer<R>,
        interval: Duration,
    ) -> Self {
        Self {
            scanner,
            synchronizer,
            interval,
        }
    }

    /// Returns the scanner driving discovery.
    #[must_use]
    pub const fn scanner(&self) -> &DiscoveryScanner<I, T, C> {
        &self.scanner
    }

    /// Runs one scan and registers everything it found.
    ///
    /// # Errors
    ///
    /// Returns [`DaemonError::Discovery`] when the inventory cannot be
    /// listed; nothing is registered in that case.
    pub async fn run_round(&self) -> DaemonResult<RoundOutcome> {
        let round = self.scanner.scan().await?;
        let sync = self.synchronizer.sync(round.iter()).await;
        if !sync.is_clean() {
            warn!(
                failed = sync.failed.len(),
                registered = sync.registered.len(),
                "some registrations failed"
            );
        }
        Ok(RoundOutcome { round, sync })
    }

    /// Runs rounds until `shutdown` resolves and returns how many ran.
    ///
    /// The first round starts immediately. Shutdown is observed between
    /// rounds; a round in progress always completes. Failed rounds are
    /// logged and the loop carries on.
    pub async fn run<F>(&self, shutdown: F) -> usize
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut rounds = 0;
        loop {
            tokio::select! {
                biased;
                () = &mut shutdown => {
                    info!(rounds, "shutdown requested, stopping discovery");
                    break;
                }
                _ = ticker.tick() => {}
            }

            if let Err(err) = self.run_round().await {
                error!(error = %err, "discovery round failed");
            }
            rounds += 1;
        }
        rounds
    }
}

impl HttpDaemon {
    /// Wires the daemon to the services named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DaemonError::Client`] when an HTTP client cannot be built.
    pub fn connect(config: &DaemonConfig) -> DaemonResult<Self> {
        let api_client = reqwest::Client::builder()
            .timeout(API_REQUEST_TIMEOUT)
            .build()
            .map_err(DaemonError::client)?;
        let probe_client = reqwest::Client::builder()
            .build()
            .map_err(DaemonError::client)?;

        let inventory = DockerEngineInventory::new(
            api_client.clone(),
            config.docker_url.as_str(),
            config.include_stopped,
        );
        let transport = HttpProbeTransport::with_client(probe_client);
        let chain = SnifferChain::new(Arc::new(transport), config.sniffers.iter().copied());
        let scanner = DiscoveryScanner::new(
            Arc::new(inventory),
            Arc::new(chain),
            Arc::new(DiscoveryCache::new()),
            Arc::new(DefaultClock),
        )
        .with_settings(config.scan.clone());
        let registry = ConsulRegistryClient::new(api_client, config.consul_url.as_str());

        Ok(Self::new(
            scanner,
            RegistrySynchronizer::new(Arc::new(registry)),
            config.interval,
        ))
    }
}
