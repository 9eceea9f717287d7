//! Error types for SlotWise.

use thiserror::Error;

/// Result type alias for SlotWise operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during slotting operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid SKU definition.
    #[error("Invalid SKU: {0}")]
    InvalidSku(String),

    /// Invalid slot definition.
    #[error("Invalid slot: {0}")]
    InvalidSlot(String),

    /// A slot id was looked up but is absent from the index.
    #[error("Slot '{0}' not found in index")]
    SlotNotFound(String),

    /// A slot that already holds a SKU was assigned again.
    #[error("Slot '{0}' is already assigned")]
    SlotOccupied(String),
}
