//! Aggregate statistics over the final slot state.

use slotwise_core::{SkuId, Slot, UnallocatedSku};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Snapshot of allocation quality, computed once after a run completes.
///
/// All volumes are raw linear-unit cubes; display-unit conversion is the
/// caller's concern.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AllocationScore {
    /// Sum of all slot volumes.
    pub total_capacity: f64,
    /// Total volume placed.
    pub used_volume: f64,
    /// Sum of `slot_volume - stored_volume` over assigned slots.
    pub total_waste: f64,
    /// `used_volume / total_capacity * 100`.
    pub utilization_pct: f64,
    /// Mean `stored_volume / slot_volume` over assigned slots.
    pub avg_fill_ratio: f64,
    /// Number of slots in the warehouse.
    pub slots_total: usize,
    /// Number of slots holding a SKU.
    pub slots_allocated: usize,
    /// Number of SKUs no slot could hold.
    pub unallocated_skus: usize,
    /// Ids of the SKUs no slot could hold.
    pub unallocated_ids: Vec<SkuId>,
}

/// Computes aggregate statistics over the final slot state.
///
/// Pure and deterministic given its inputs; safe to call repeatedly for
/// reporting and regression tests.
pub fn score_allocation(
    slots: &[Slot],
    total_capacity: f64,
    used_volume: f64,
    unallocated: &[UnallocatedSku],
) -> AllocationScore {
    let mut fill_ratios = Vec::new();
    let mut total_waste = 0.0;

    for slot in slots.iter().filter(|slot| slot.is_assigned()) {
        let volume = slot.volume();
        if volume > 0.0 {
            fill_ratios.push(slot.stored_volume() / volume);
            total_waste += volume - slot.stored_volume();
        }
    }

    let avg_fill_ratio = if fill_ratios.is_empty() {
        0.0
    } else {
        fill_ratios.iter().sum::<f64>() / fill_ratios.len() as f64
    };

    let utilization_pct = if total_capacity > 0.0 {
        used_volume / total_capacity * 100.0
    } else {
        0.0
    };

    AllocationScore {
        total_capacity,
        used_volume,
        total_waste,
        utilization_pct,
        avg_fill_ratio,
        slots_total: slots.len(),
        slots_allocated: fill_ratios.len(),
        unallocated_skus: unallocated.len(),
        unallocated_ids: unallocated.iter().map(|u| u.id.clone()).collect(),
    }
}
