//! Result of one discovery round.

use crate::service::domain::{ContainerId, ServiceRecord};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Counters describing what a round did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundStats {
    /// Containers reported by the inventory.
    pub containers: usize,
    /// Containers answered from the cache.
    pub cache_hits: usize,
    /// Containers newly classified this round.
    pub detected: usize,
    /// Containers probed without a match, or without ports.
    pub skipped: usize,
    /// Cache entries dropped for vanished containers.
    pub evicted: usize,
}

/// Records discovered in one round, keyed by container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryRound {
    records: BTreeMap<ContainerId, ServiceRecord>,
    stats: RoundStats,
    completed_at: DateTime<Utc>,
}

impl DiscoveryRound {
    /// Creates a round result.
    #[must_use]
    pub const fn new(
        records: BTreeMap<ContainerId, ServiceRecord>,
        stats: RoundStats,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            records,
            stats,
            completed_at,
        }
    }

    /// Returns the discovered records.
    #[must_use]
    pub const fn records(&self) -> &BTreeMap<ContainerId, ServiceRecord> {
        &self.records
    }

    /// Returns the record for `id`.
    #[must_use]
    pub fn get(&self, id: &ContainerId) -> Option<&ServiceRecord> {
        self.records.get(id)
    }

    /// Iterates the discovered records in container order.
    pub fn iter(&self) -> impl Iterator<Item = &ServiceRecord> {
        self.records.values()
    }

    /// Returns the number of discovered records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when nothing was discovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the round counters.
    #[must_use]
    pub const fn stats(&self) -> RoundStats {
        self.stats
    }

    /// Returns when the round finished.
    #[must_use]
    pub const fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}
