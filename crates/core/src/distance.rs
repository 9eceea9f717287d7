//! Manhattan distance between slot positions.

use crate::slot::SlotIndex;
use crate::{Error, Result};

/// Sum of absolute coordinate differences between two slots' positions.
///
/// Fails with [`Error::SlotNotFound`] naming the missing id when either
/// slot is absent from the index; an unknown id is never a silent zero.
pub fn manhattan_distance(a: &str, b: &str, index: &SlotIndex) -> Result<f64> {
    let pos_a = index
        .position(a)
        .ok_or_else(|| Error::SlotNotFound(a.to_string()))?;
    let pos_b = index
        .position(b)
        .ok_or_else(|| Error::SlotNotFound(b.to_string()))?;

    Ok((pos_a.x - pos_b.x).abs() + (pos_a.y - pos_b.y).abs() + (pos_a.z - pos_b.z).abs())
}
