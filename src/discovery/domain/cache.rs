//! Per-process cache of classified containers.

use crate::service::domain::{ContainerId, ServiceRecord};
use std::collections::{BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock};

/// Records of containers that were already classified.
///
/// A container enters the cache the first time a sniffer matches it and is
/// never re-probed while it stays there. Non-matching containers are never
/// cached, so they are retried on the next round. The cache is safe to share
/// between concurrent probes; insertion keeps the first record stored.
#[derive(Debug, Default)]
pub struct DiscoveryCache {
    entries: RwLock<HashMap<ContainerId, ServiceRecord>>,
}

impl DiscoveryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached record for `id`.
    #[must_use]
    pub fn get(&self, id: &ContainerId) -> Option<ServiceRecord> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Returns `true` when `id` has a cached record.
    #[must_use]
    pub fn contains(&self, id: &ContainerId) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Caches `record` unless its container already has one.
    ///
    /// Returns the record held by the cache afterwards, which is the earlier
    /// one when the container was already present.
    pub fn insert_if_absent(&self, record: ServiceRecord) -> ServiceRecord {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(record.id().clone())
            .or_insert(record)
            .clone()
    }

    /// Drops every record whose container is not in `live`.
    ///
    /// Returns the evicted identifiers in ascending order.
    pub fn retain_only(&self, live: &BTreeSet<ContainerId>) -> Vec<ContainerId> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let mut evicted: Vec<ContainerId> = entries
            .keys()
            .filter(|id| !live.contains(*id))
            .cloned()
            .collect();
        evicted.sort();
        for id in &evicted {
            entries.remove(id);
        }
        evicted
    }

    /// Returns the number of cached records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
