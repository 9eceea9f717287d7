//! # SlotWise Alloc
//!
//! Geometric slotting allocator for the SlotWise warehouse engine.
//!
//! ## Components
//!
//! - **Geometry engine**: [`layered_capacity`], [`layer_layout`],
//!   [`layer_matrices`]: pure orientation search and layer decomposition
//!   over dimension triples.
//! - **Fit cache**: [`FitCache`], per-run memoization of capacity results.
//! - **Allocator**: [`assign_initial_stock`], two-pass SKU-to-slot
//!   assignment driven by a seedable random generator.
//! - **Scorer**: [`score_allocation`], aggregate utilization statistics
//!   over the final slot state.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod allocator;
pub mod cache;
pub mod geometry;
pub mod score;

// Re-exports
pub use allocator::{assign_initial_stock, AllocConfig, AllocationOutcome, FillMode};
pub use cache::FitCache;
pub use geometry::{layer_layout, layer_matrices, layered_capacity, Fit, LayerGrid, LayerMatrices};
pub use score::{score_allocation, AllocationScore};
