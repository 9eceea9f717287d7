//! Two-pass SKU-to-slot allocation.
//!
//! Pass 1 walks the SKUs hardest-to-place first and gives each one slot,
//! chosen uniformly at random among every slot that can geometrically hold
//! it. Pass 2 sweeps the slots that are still empty, in shuffled order,
//! and fills each with a randomly drawn SKU, falling back to an exhaustive
//! scan when the random trials come up dry. Deliberately chaotic: the
//! resulting layout is an exploratory baseline, not an optimum.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use slotwise_core::{Assignment, Result, Sku, Slot, UnallocatedSku};

use crate::cache::FitCache;
use crate::geometry::{layer_layout, Fit};
use crate::score::{score_allocation, AllocationScore};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fraction of a slot's capacity placed in pass 1 under
/// [`FillMode::UtilizationCapped`].
const PASS1_FILL: f64 = 0.25;

/// Fraction of a slot's capacity placed in pass 2 under
/// [`FillMode::UtilizationCapped`].
const PASS2_FILL: f64 = 0.5;

/// How much of a feasible slot the allocator fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FillMode {
    /// Fill every feasible slot to its full geometric capacity; no global
    /// ceiling.
    #[default]
    MaxCapacity,
    /// Partially fill slots (25% in pass 1, 50% in pass 2) and stop once
    /// total used volume reaches `target_utilization x total_capacity`.
    UtilizationCapped,
}

/// Configuration for an allocation run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AllocConfig {
    /// Fill behavior.
    pub fill_mode: FillMode,

    /// Target utilization (0.0 - 1.0) for [`FillMode::UtilizationCapped`].
    pub target_utilization: f64,

    /// Random SKU draws per empty slot in pass 2 before the exhaustive
    /// fallback scan.
    pub max_random_tries: usize,

    /// Seed for the run's random generator. With a seed set, the entire
    /// run is bit-for-bit reproducible.
    pub seed: Option<u64>,
}

impl Default for AllocConfig {
    fn default() -> Self {
        Self {
            fill_mode: FillMode::default(),
            target_utilization: 0.5,
            max_random_tries: 200,
            seed: None,
        }
    }
}

impl AllocConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fill mode.
    pub fn with_fill_mode(mut self, mode: FillMode) -> Self {
        self.fill_mode = mode;
        self
    }

    /// Sets the target utilization, clamped to 0.0 - 1.0.
    pub fn with_target_utilization(mut self, target: f64) -> Self {
        self.target_utilization = target.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of random trials per empty slot.
    pub fn with_max_random_tries(mut self, tries: usize) -> Self {
        self.max_random_tries = tries.max(1);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Result of an allocation run.
#[derive(Debug, Clone)]
pub struct AllocationOutcome {
    /// Total volume placed across all slots.
    pub used_volume: f64,

    /// SKUs no slot could hold, with their geometry echoed.
    pub unallocated: Vec<UnallocatedSku>,

    /// Aggregate statistics over the final slot state.
    pub score: AllocationScore,
}

/// Assigns SKUs to slots in two passes, mutating the slots in place.
///
/// The fit cache is supplied by the caller and scoped to one run; pass a
/// fresh [`FitCache`] rather than sharing one across runs. Every random
/// decision draws from one generator seeded from `config.seed`, so a
/// seeded run reproduces exactly. Per-item infeasibility is collected,
/// never raised: a SKU that fits nowhere lands in the unallocated list and
/// a slot nothing fits stays empty. Only malformed inputs
/// (dimensions <= 0) produce a hard error.
pub fn assign_initial_stock(
    skus: &[Sku],
    slots: &mut [Slot],
    total_capacity: f64,
    config: &AllocConfig,
    cache: &mut FitCache,
) -> Result<AllocationOutcome> {
    for sku in skus {
        sku.validate()?;
    }
    for slot in slots.iter() {
        slot.validate()?;
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let volume_budget = match config.fill_mode {
        FillMode::MaxCapacity => f64::INFINITY,
        FillMode::UtilizationCapped => config.target_utilization * total_capacity,
    };

    let mut used_volume = 0.0;
    let mut unallocated = Vec::new();

    // Largest slots first: keeps big slots available for awkward SKUs.
    let mut slot_order: Vec<usize> = (0..slots.len()).collect();
    slot_order.sort_by(|&a, &b| slots[b].volume().total_cmp(&slots[a].volume()));

    // Hardest SKUs first, ranked by their largest single dimension.
    let mut sku_order: Vec<usize> = (0..skus.len()).collect();
    sku_order.sort_by(|&a, &b| skus[b].max_dimension().total_cmp(&skus[a].max_dimension()));

    // Pass 1: every SKU gets one slot, if any slot can hold it.
    for &sku_idx in &sku_order {
        let sku = &skus[sku_idx];

        let mut feasible: Vec<(usize, Fit)> = Vec::new();
        for &slot_idx in &slot_order {
            if slots[slot_idx].is_assigned() {
                continue;
            }
            if let Some(fit) = cache.capacity(&slots[slot_idx], sku) {
                feasible.push((slot_idx, fit));
            }
        }

        if feasible.is_empty() {
            log::warn!("SKU '{}' does not fit in any slot", sku.id());
            unallocated.push(UnallocatedSku::from_sku(sku));
            continue;
        }

        if let Some(&(slot_idx, fit)) = feasible.choose(&mut rng) {
            let units = units_within_budget(
                &fit,
                PASS1_FILL,
                sku.volume(),
                used_volume,
                volume_budget,
                config.fill_mode,
            );
            match units {
                Some(init_units) => {
                    let assignment = make_assignment(sku, fit, init_units);
                    used_volume += assignment.stored_volume;
                    slots[slot_idx].assign(assignment)?;
                }
                None => {
                    log::debug!("volume budget exhausted before SKU '{}'", sku.id());
                }
            }
        }
    }

    log::debug!(
        "pass 1 done: {} unallocated, used volume {used_volume}",
        unallocated.len()
    );

    // Pass 2: saturate the slots that are still empty.
    if !skus.is_empty() {
        let mut remaining: Vec<usize> = slot_order
            .iter()
            .copied()
            .filter(|&idx| !slots[idx].is_assigned())
            .collect();
        remaining.shuffle(&mut rng);

        for slot_idx in remaining {
            if used_volume >= volume_budget {
                break;
            }

            let mut placed = false;

            // Random trials first.
            for _ in 0..config.max_random_tries {
                let sku = &skus[rng.gen_range(0..skus.len())];
                let Some(fit) = cache.capacity(&slots[slot_idx], sku) else {
                    continue;
                };

                let units = units_within_budget(
                    &fit,
                    PASS2_FILL,
                    sku.volume(),
                    used_volume,
                    volume_budget,
                    config.fill_mode,
                );
                if let Some(init_units) = units {
                    let assignment = make_assignment(sku, fit, init_units);
                    used_volume += assignment.stored_volume;
                    slots[slot_idx].assign(assignment)?;
                    placed = true;
                }
                // A feasible SKU was drawn; either it was placed or the
                // budget is spent. Stop drawing for this slot.
                break;
            }

            // Exhaustive fallback over a fresh shuffle.
            if !placed && used_volume < volume_budget {
                let mut fallback: Vec<usize> = (0..skus.len()).collect();
                fallback.shuffle(&mut rng);

                for sku_idx in fallback {
                    let sku = &skus[sku_idx];
                    let Some(fit) = cache.capacity(&slots[slot_idx], sku) else {
                        continue;
                    };

                    let units = units_within_budget(
                        &fit,
                        PASS2_FILL,
                        sku.volume(),
                        used_volume,
                        volume_budget,
                        config.fill_mode,
                    );
                    if let Some(init_units) = units {
                        let assignment = make_assignment(sku, fit, init_units);
                        used_volume += assignment.stored_volume;
                        slots[slot_idx].assign(assignment)?;
                    }
                    break;
                }
            }

            // A slot no SKU fits stays empty; that is a legitimate outcome.
        }
    }

    log::debug!(
        "allocation done: cache {} entries, {} hits, {} misses",
        cache.len(),
        cache.hits(),
        cache.misses()
    );

    let score = score_allocation(slots, total_capacity, used_volume, &unallocated);

    Ok(AllocationOutcome {
        used_volume,
        unallocated,
        score,
    })
}

/// Units to place for a fit under the configured fill mode, bounded by the
/// remaining volume budget. `None` when the budget admits no whole unit.
fn units_within_budget(
    fit: &Fit,
    fraction: f64,
    unit_volume: f64,
    used_volume: f64,
    volume_budget: f64,
    mode: FillMode,
) -> Option<usize> {
    let wanted = match mode {
        FillMode::MaxCapacity => fit.units,
        FillMode::UtilizationCapped => ((fit.units as f64 * fraction) as usize).max(1),
    };

    if volume_budget.is_infinite() {
        return Some(wanted);
    }

    let remaining = volume_budget - used_volume;
    if wanted as f64 * unit_volume <= remaining {
        return Some(wanted);
    }

    // Saturating float-to-int cast: a negative remainder yields zero.
    let capped = ((remaining / unit_volume).floor() as usize).min(fit.units);
    (capped > 0).then_some(capped)
}

/// Builds the allocation record for `init_units` of a SKU placed by `fit`.
fn make_assignment(sku: &Sku, fit: Fit, init_units: usize) -> Assignment {
    Assignment {
        sku: sku.id().clone(),
        max_units: fit.units,
        init_units,
        current_stock: init_units,
        orientation: fit.orientation,
        grid: fit.grid,
        layout: layer_layout(init_units, fit.grid),
        stored_volume: init_units as f64 * sku.volume(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skus() -> Vec<Sku> {
        vec![
            Sku::new("S1", 300.0, 400.0, 500.0),
            Sku::new("S2", 100.0, 100.0, 100.0),
            Sku::new("S3", 250.0, 250.0, 250.0),
        ]
    }

    fn slots() -> Vec<Slot> {
        vec![
            Slot::new("L1", "rack", 1000.0, 1000.0, 2000.0).with_position(0.0, 0.0, 0.0),
            Slot::new("L2", "rack", 1000.0, 1000.0, 1000.0).with_position(1000.0, 0.0, 0.0),
            Slot::new("L3", "bin", 500.0, 500.0, 500.0).with_position(2000.0, 0.0, 0.0),
        ]
    }

    fn capacity(slots: &[Slot]) -> f64 {
        slots.iter().map(Slot::volume).sum()
    }

    #[test]
    fn test_every_sku_placed() {
        let skus = skus();
        let mut slots = slots();
        let total = capacity(&slots);

        let config = AllocConfig::new().with_seed(7);
        let outcome =
            assign_initial_stock(&skus, &mut slots, total, &config, &mut FitCache::new()).unwrap();

        assert!(outcome.unallocated.is_empty());
        assert_eq!(slots.iter().filter(|s| s.is_assigned()).count(), 3);
    }

    #[test]
    fn test_used_volume_matches_stored() {
        let skus = skus();
        let mut slots = slots();
        let total = capacity(&slots);

        let config = AllocConfig::new().with_seed(7);
        let outcome =
            assign_initial_stock(&skus, &mut slots, total, &config, &mut FitCache::new()).unwrap();

        let stored: f64 = slots.iter().map(Slot::stored_volume).sum();
        assert!((stored - outcome.used_volume).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_sku_is_a_hard_error() {
        let skus = vec![Sku::new("S1", -1.0, 2.0, 3.0)];
        let mut slots = slots();
        let total = capacity(&slots);

        let result = assign_initial_stock(
            &skus,
            &mut slots,
            total,
            &AllocConfig::new(),
            &mut FitCache::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_units_within_budget_caps() {
        let fit = Fit {
            units: 10,
            orientation: nalgebra::Vector3::new(1.0, 1.0, 1.0),
            grid: slotwise_core::Grid::new(10, 1, 1),
        };

        // 10 units wanted, budget only admits 3.
        let units = units_within_budget(&fit, 1.0, 1.0, 0.0, 3.5, FillMode::UtilizationCapped);
        assert_eq!(units, Some(3));

        // Budget already spent.
        let none = units_within_budget(&fit, 1.0, 1.0, 4.0, 3.5, FillMode::UtilizationCapped);
        assert_eq!(none, None);

        // Unbounded mode ignores the budget.
        let max = units_within_budget(&fit, 1.0, 1.0, 4.0, f64::INFINITY, FillMode::MaxCapacity);
        assert_eq!(max, Some(10));
    }
}
