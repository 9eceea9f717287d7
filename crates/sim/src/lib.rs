//! # SlotWise Sim
//!
//! Monthly demand and replenishment simulation over an allocated warehouse
//! layout.
//!
//! The simulation consumes the slots the allocator produced and mutates
//! only their current stock: each month it receives arriving replenishment
//! orders, samples demand per SKU (distribution chosen by ABC class),
//! ships from the SKU's slots, and places new orders when pooled stock
//! falls to the reorder point.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod demand;
pub mod run;
pub mod state;

// Re-exports
pub use demand::{reorder_params, sample_demand, sample_lead_time};
pub use run::{run_simulation, summarize, SimConfig, SimulationSummary, SkuKpi};
pub use state::{add_stock, build_sku_states, consume_stock, OpenOrder, SkuState};
