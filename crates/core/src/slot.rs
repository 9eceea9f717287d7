//! Storage slot types and allocation state.

use std::collections::HashMap;

use nalgebra::Vector3;

use crate::sku::SkuId;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for a storage slot.
pub type SlotId = String;

/// Unit counts along each slot axis under a chosen orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid {
    /// Units along the slot X axis.
    pub nx: usize,
    /// Units along the slot Y axis.
    pub ny: usize,
    /// Units along the slot Z axis.
    pub nz: usize,
}

impl Grid {
    /// Creates a new grid.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self { nx, ny, nz }
    }

    /// Units in one horizontal layer.
    pub fn units_per_layer(&self) -> usize {
        self.nx * self.ny
    }

    /// Total unit capacity of the grid.
    pub fn capacity(&self) -> usize {
        self.nx * self.ny * self.nz
    }
}

/// Decomposition of an assigned unit count into horizontal layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Layout {
    /// Number of completely filled layers.
    pub full_layers: usize,
    /// Units in one complete layer.
    pub units_per_layer: usize,
    /// Units on the topmost, partially filled layer.
    pub partial_units: usize,
}

/// Allocation state of a slot that holds a SKU.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assignment {
    /// The assigned SKU.
    pub sku: SkuId,

    /// Maximum whole units of the SKU this slot can hold.
    pub max_units: usize,

    /// Units placed at allocation time.
    pub init_units: usize,

    /// Units currently in the slot. The simulation is the only writer of
    /// this field after allocation.
    pub current_stock: usize,

    /// Oriented SKU dimensions along the slot's X/Y/Z axes.
    pub orientation: Vector3<f64>,

    /// Unit counts along each slot axis.
    pub grid: Grid,

    /// Layer decomposition of `init_units`.
    pub layout: Layout,

    /// Volume occupied by `init_units`.
    pub stored_volume: f64,
}

/// One physical storage location with fixed box dimensions and a position.
///
/// A slot holds at most one SKU type at a time; `assignment` is `None`
/// while the slot is empty. The allocator is the only writer of the
/// assignment, transitioning empty to assigned at most once per run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Slot {
    /// Unique identifier.
    id: SlotId,

    /// Location-type tag.
    kind: String,

    /// Dimensions (X, Y, Z) in the warehouse linear unit.
    dimensions: Vector3<f64>,

    /// Position of the slot in the warehouse.
    position: Vector3<f64>,

    /// Allocation state; `None` while empty.
    assignment: Option<Assignment>,
}

impl Slot {
    /// Creates a new empty slot with the given id, type tag and dimensions.
    pub fn new(
        id: impl Into<SlotId>,
        kind: impl Into<String>,
        width: f64,
        depth: f64,
        height: f64,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            dimensions: Vector3::new(width, depth, height),
            position: Vector3::zeros(),
            assignment: None,
        }
    }

    /// Sets the slot position.
    pub fn with_position(mut self, x: f64, y: f64, z: f64) -> Self {
        self.position = Vector3::new(x, y, z);
        self
    }

    /// Returns the identifier.
    pub fn id(&self) -> &SlotId {
        &self.id
    }

    /// Returns the location-type tag.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the dimensions (X, Y, Z).
    pub fn dimensions(&self) -> &Vector3<f64> {
        &self.dimensions
    }

    /// Returns the width (X).
    pub fn width(&self) -> f64 {
        self.dimensions.x
    }

    /// Returns the depth (Y).
    pub fn depth(&self) -> f64 {
        self.dimensions.y
    }

    /// Returns the height (Z).
    pub fn height(&self) -> f64 {
        self.dimensions.z
    }

    /// Returns the position.
    pub fn position(&self) -> &Vector3<f64> {
        &self.position
    }

    /// Slot volume: the exact product of the dimensions.
    pub fn volume(&self) -> f64 {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }

    /// Validates the slot definition.
    pub fn validate(&self) -> Result<()> {
        if self.dimensions.x <= 0.0 || self.dimensions.y <= 0.0 || self.dimensions.z <= 0.0 {
            return Err(Error::InvalidSlot(format!(
                "All dimensions for '{}' must be positive",
                self.id
            )));
        }
        Ok(())
    }

    /// Returns true when the slot holds a SKU.
    pub fn is_assigned(&self) -> bool {
        self.assignment.is_some()
    }

    /// Returns the allocation state.
    pub fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }

    /// Returns the allocation state mutably. Callers other than the
    /// allocator may touch only `current_stock`.
    pub fn assignment_mut(&mut self) -> Option<&mut Assignment> {
        self.assignment.as_mut()
    }

    /// Transitions the slot from empty to assigned.
    pub fn assign(&mut self, assignment: Assignment) -> Result<()> {
        if self.assignment.is_some() {
            return Err(Error::SlotOccupied(self.id.clone()));
        }
        self.assignment = Some(assignment);
        Ok(())
    }

    /// Volume currently stored; zero while empty.
    pub fn stored_volume(&self) -> f64 {
        self.assignment.as_ref().map_or(0.0, |a| a.stored_volume)
    }

    /// Stored volume over slot volume; zero while empty.
    pub fn fill_ratio(&self) -> f64 {
        let volume = self.volume();
        if volume > 0.0 {
            self.stored_volume() / volume
        } else {
            0.0
        }
    }
}

/// Id to position lookup over a set of slots.
#[derive(Debug, Clone, Default)]
pub struct SlotIndex {
    positions: HashMap<SlotId, Vector3<f64>>,
}

impl SlotIndex {
    /// Builds an index over the given slots.
    pub fn from_slots(slots: &[Slot]) -> Self {
        Self {
            positions: slots
                .iter()
                .map(|slot| (slot.id.clone(), slot.position))
                .collect(),
        }
    }

    /// Returns the position of a slot, if present.
    pub fn position(&self, id: &str) -> Option<&Vector3<f64>> {
        self.positions.get(id)
    }

    /// Returns true when the id is present.
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Number of indexed slots.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true when the index is empty.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
