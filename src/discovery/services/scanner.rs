//! Service layer running discovery rounds.
//!
//! Provides [`DiscoveryScanner`], which turns the current container set into
//! a [`DiscoveryRound`] by combining cached records with fresh sniffer
//! matches.

use crate::discovery::{
    domain::{ContainerSummary, DiscoveryCache, DiscoveryRound, EvictionPolicy, RoundStats},
    ports::{ContainerInventory, InventoryError},
};
use crate::service::domain::{ContainerId, ServiceRecord};
use crate::sniffing::{domain::Detection, ports::ProbeTransport, services::SnifferChain};
use futures::{StreamExt, stream};
use mockable::Clock;
use std::collections::{BTreeMap, BTreeSet};
use std::num::NonZeroUsize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Host used to reach published container ports.
pub const DEFAULT_PROBE_HOST: &str = "localhost";

/// Tunables for discovery rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    /// Host on which published container ports are probed.
    pub probe_host: String,
    /// Fate of cached records for vanished containers.
    pub eviction: EvictionPolicy,
    /// Maximum number of containers probed at once.
    pub probe_concurrency: NonZeroUsize,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            probe_host: DEFAULT_PROBE_HOST.to_owned(),
            eviction: EvictionPolicy::default(),
            probe_concurrency: NonZeroUsize::MIN,
        }
    }
}

/// Service-level errors for discovery rounds.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The inventory could not be listed; the round is abandoned.
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Result type for discovery operations.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// Discovery round orchestration service.
///
/// The scanner owns the cache: sniffers never see it and the registry side
/// only receives the records of finished rounds.
pub struct DiscoveryScanner<I, T, C>
where
    I: ContainerInventory,
    T: ProbeTransport,
    C: Clock + Send + Sync,
{
    inventory: Arc<I>,
    chain: Arc<SnifferChain<T>>,
    cache: Arc<DiscoveryCache>,
    clock: Arc<C>,
    settings: ScanSettings,
}

impl<I, T, C> DiscoveryScanner<I, T, C>
where
    I: ContainerInventory,
    T: ProbeTransport,
    C: Clock + Send + Sync,
{
    /// Creates a scanner with default settings.
    #[must_use]
    pub fn new(
        inventory: Arc<I>,
        chain: Arc<SnifferChain<T>>,
        cache: Arc<DiscoveryCache>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            inventory,
            chain,
            cache,
            clock,
            settings: ScanSettings::default(),
        }
    }

    /// Replaces the scan settings.
    #[must_use]
    pub fn with_settings(mut self, settings: ScanSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the scan settings.
    #[must_use]
    pub const fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// Returns the record cache.
    #[must_use]
    pub const fn cache(&self) -> &Arc<DiscoveryCache> {
        &self.cache
    }

    /// Runs one discovery round.
    ///
    /// Cached containers are returned as cached; the others are probed once.
    /// Containers without a match are left out and retried next round.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Inventory`] when the container set cannot
    /// be listed.
    pub async fn scan(&self) -> DiscoveryResult<DiscoveryRound> {
        let containers = self.inventory.list_containers().await?;
        if containers.is_empty() {
            info!("no containers found");
        }

        let mut stats = RoundStats {
            containers: containers.len(),
            ..RoundStats::default()
        };
        let mut records = BTreeMap::new();
        let mut uncached = Vec::new();

        for container in &containers {
            if let Some(record) = self.cache.get(container.id()) {
                debug!(container = container.id().short(), "using cached service record");
                stats.cache_hits += 1;
                records.insert(container.id().clone(), record);
            } else {
                uncached.push(container);
            }
        }

        let outcomes: Vec<Option<ServiceRecord>> = stream::iter(uncached)
            .map(|container| self.probe(container))
            .buffer_unordered(self.settings.probe_concurrency.get())
            .collect()
            .await;

        for outcome in outcomes {
            match outcome {
                Some(record) => {
                    let cached = self.cache.insert_if_absent(record);
                    stats.detected += 1;
                    records.insert(cached.id().clone(), cached);
                }
                None => stats.skipped += 1,
            }
        }

        if self.settings.eviction == EvictionPolicy::EvictMissing {
            let live: BTreeSet<ContainerId> =
                containers.iter().map(|c| c.id().clone()).collect();
            let evicted = self.cache.retain_only(&live);
            for id in &evicted {
                info!(container = id.short(), "evicted record of vanished container");
            }
            stats.evicted = evicted.len();
        }

        info!(
            discovered = records.len(),
            containers = stats.containers,
            cache_hits = stats.cache_hits,
            detected = stats.detected,
            skipped = stats.skipped,
            "discovery round complete"
        );
        Ok(DiscoveryRound::new(records, stats, self.clock.utc()))
    }

    async fn probe(&self, container: &ContainerSummary) -> Option<ServiceRecord> {
        let Some(endpoint) = container.endpoint(&self.settings.probe_host) else {
            debug!(
                container = container.id().short(),
                "no published ports; container is not reachable from the probe host"
            );
            return None;
        };

        match self.chain.classify(&endpoint, &container.facts()).await {
            Detection::Detected(record) => Some(record),
            Detection::NotDetected(reason) => {
                debug!(
                    container = container.id().short(),
                    %endpoint,
                    %reason,
                    "no agent protocol detected"
                );
                None
            }
        }
    }
}
