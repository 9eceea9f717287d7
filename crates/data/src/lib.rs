//! # SlotWise Data
//!
//! This crate provides:
//! - CSV loaders for SKU and slot definitions, with demand-rank ABC
//!   classification
//! - Report writers: console summary, allocation/unallocated CSV exports,
//!   score and KPI JSON exports
//! - The `slotwise-runner` CLI binary

mod loader;
mod report;

pub use loader::{load_skus, load_skus_from_reader, load_slots, load_slots_from_reader,
    load_warehouse, LoadError, WarehouseData};
pub use report::{ascii_layer, export_allocations_csv, export_score_json,
    export_unallocated_csv, write_initial_state, write_simulation_summary};
