//! # SlotWise
//!
//! Warehouse slotting engine: assigns SKUs to physical storage slots,
//! maximizing volumetric utilization under each slot's exact 3D geometry,
//! then simulates monthly demand and replenishment against the layout.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use slotwise::{assign_initial_stock, AllocConfig, FitCache, Sku, Slot};
//!
//! let skus = vec![Sku::new("S1", 300.0, 400.0, 500.0)];
//! let mut slots = vec![Slot::new("L1", "rack", 1000.0, 1000.0, 2000.0)];
//! let total_capacity: f64 = slots.iter().map(Slot::volume).sum();
//!
//! let config = AllocConfig::new().with_seed(42);
//! let mut cache = FitCache::new();
//! let outcome = assign_initial_stock(&skus, &mut slots, total_capacity, &config, &mut cache)?;
//! println!("utilization: {:.1}%", outcome.score.utilization_pct);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support across all member crates

/// Core data model.
pub use slotwise_core as core;

/// Geometric allocator.
pub use slotwise_alloc as alloc;

/// Demand and replenishment simulation.
pub use slotwise_sim as sim;

// Re-export commonly used types at root level
pub use slotwise_alloc::{
    assign_initial_stock, layered_capacity, AllocConfig, AllocationOutcome, AllocationScore,
    FillMode, FitCache,
};
pub use slotwise_core::{manhattan_distance, AbcClass, Sku, Slot, SlotIndex, UnallocatedSku};
pub use slotwise_sim::{build_sku_states, run_simulation, SimConfig, SkuKpi};
