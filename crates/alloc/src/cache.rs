//! Per-run memoization of capacity searches.

use std::collections::HashMap;

use slotwise_core::{Sku, SkuId, Slot, SlotId};

use crate::geometry::{layered_capacity, Fit};

/// Memoizes `(slot, SKU) -> capacity` results for the duration of one
/// allocation run.
///
/// The allocator probes many slot/SKU combinations across its two passes;
/// the orientation search is its dominant cost, so repeated pairs are
/// answered from the map. Compute-once, no eviction, no cross-run
/// persistence. Built for a single sequential allocation flow; create one
/// cache per run rather than sharing across runs.
#[derive(Debug, Default)]
pub struct FitCache {
    entries: HashMap<(SlotId, SkuId), Option<Fit>>,
    hits: u64,
    misses: u64,
}

impl FitCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the capacity result for the pair, computing it on first use.
    pub fn capacity(&mut self, slot: &Slot, sku: &Sku) -> Option<Fit> {
        let key = (slot.id().clone(), sku.id().clone());
        if let Some(fit) = self.entries.get(&key) {
            self.hits += 1;
            return *fit;
        }

        self.misses += 1;
        let fit = layered_capacity(slot.dimensions(), sku.dimensions());
        self.entries.insert(key, fit);
        fit
    }

    /// Number of cached pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups answered from the map.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that ran the orientation search.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}
