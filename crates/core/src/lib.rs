//! # SlotWise Core
//!
//! Core data model for the SlotWise warehouse slotting engine.
//!
//! This crate provides the foundational types shared between the geometric
//! allocator and the demand/replenishment simulation:
//!
//! - **SKU types**: [`Sku`], [`AbcClass`], [`UnallocatedSku`]
//! - **Slot types**: [`Slot`], [`Assignment`], [`Grid`], [`Layout`]
//! - **Lookup & distance**: [`SlotIndex`], [`manhattan_distance`]
//! - **Errors**: [`Error`], [`Result`]
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod distance;
pub mod error;
pub mod sku;
pub mod slot;

// Re-exports
pub use distance::manhattan_distance;
pub use error::{Error, Result};
pub use sku::{AbcClass, Sku, SkuId, UnallocatedSku};
pub use slot::{Assignment, Grid, Layout, Slot, SlotId, SlotIndex};
