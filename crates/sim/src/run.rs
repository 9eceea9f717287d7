//! Monthly demand and replenishment simulation loop.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::SeedableRng;

use slotwise_core::{SkuId, Slot};

use crate::demand::{reorder_params, sample_demand, sample_lead_time};
use crate::state::{add_stock, consume_stock, OpenOrder, SkuState};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimConfig {
    /// Number of months to simulate.
    pub months: u32,

    /// Seed for the run's random generator. With a seed set, the run is
    /// bit-for-bit reproducible.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            months: 36,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of months.
    pub fn with_months(mut self, months: u32) -> Self {
        self.months = months;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Accumulated service figures for one SKU.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkuKpi {
    /// Total demand over the run.
    pub demand: u64,
    /// Units shipped.
    pub shipped: u64,
    /// Demand lost to stockouts.
    pub lost: u64,
}

impl SkuKpi {
    /// Shipped over demand; 1.0 when no demand occurred.
    pub fn fill_rate(&self) -> f64 {
        if self.demand == 0 {
            1.0
        } else {
            self.shipped as f64 / self.demand as f64
        }
    }
}

/// Aggregate service figures across all SKUs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationSummary {
    /// SKUs simulated.
    pub skus: usize,
    /// Total demand over the run.
    pub total_demand: u64,
    /// Units shipped.
    pub total_shipped: u64,
    /// Demand lost to stockouts.
    pub total_lost: u64,
}

impl SimulationSummary {
    /// Overall service level as a percentage; 100.0 when no demand occurred.
    pub fn fill_rate_pct(&self) -> f64 {
        if self.total_demand == 0 {
            100.0
        } else {
            100.0 * self.total_shipped as f64 / self.total_demand as f64
        }
    }
}

/// Rolls per-SKU KPIs up into a run summary.
pub fn summarize(kpis: &BTreeMap<SkuId, SkuKpi>) -> SimulationSummary {
    SimulationSummary {
        skus: kpis.len(),
        total_demand: kpis.values().map(|k| k.demand).sum(),
        total_shipped: kpis.values().map(|k| k.shipped).sum(),
        total_lost: kpis.values().map(|k| k.lost).sum(),
    }
}

/// Runs the monthly loop over the allocated layout.
///
/// Each month: receive arriving replenishment orders, sample demand and
/// ship from the SKU's slots, then place a new order for every SKU whose
/// pooled stock fell to its reorder point while no order is outstanding.
/// Mutates only `current_stock` on the slots.
pub fn run_simulation(
    states: &mut BTreeMap<SkuId, SkuState>,
    slots: &mut [Slot],
    config: &SimConfig,
) -> BTreeMap<SkuId, SkuKpi> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut kpis: BTreeMap<SkuId, SkuKpi> = states
        .keys()
        .map(|id| (id.clone(), SkuKpi::default()))
        .collect();

    for month in 1..=config.months {
        // 1) Receive arriving orders.
        for state in states.values_mut() {
            if state.open_orders.is_empty() {
                continue;
            }
            let (arriving, still_open): (Vec<OpenOrder>, Vec<OpenOrder>) = state
                .open_orders
                .drain(..)
                .partition(|order| order.arrival <= month);
            state.open_orders = still_open;

            for order in arriving {
                add_stock(state, slots, order.qty);
            }
        }

        // 2) Demand and shipment.
        for (id, state) in states.iter_mut() {
            let demand = sample_demand(state.mean_demand, state.abc_class, &mut rng);
            let (shipped, lost) = consume_stock(state, slots, demand);

            if let Some(kpi) = kpis.get_mut(id) {
                kpi.demand += demand as u64;
                kpi.shipped += shipped as u64;
                kpi.lost += lost as u64;
            }
        }

        // 3) Replenishment decisions.
        for state in states.values_mut() {
            if state.max_capacity == 0 {
                continue;
            }

            let (reorder_point, target) = reorder_params(state.abc_class, state.max_capacity);
            if state.total_stock <= reorder_point && state.open_orders.is_empty() {
                let qty = target.saturating_sub(state.total_stock);
                if qty > 0 {
                    let lead = sample_lead_time(state.abc_class, &mut rng);
                    state.open_orders.push(OpenOrder {
                        qty,
                        arrival: month + lead,
                    });
                }
            }
        }
    }

    log::debug!("simulated {} months over {} SKUs", config.months, states.len());

    kpis
}
