//! Layered capacity search over axis-aligned SKU orientations.

use nalgebra::Vector3;
use slotwise_core::{Grid, Layout};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The 6 axis-aligned orientations of a box, as index permutations of its
/// dimension triple. The enumeration order is fixed: ties in the capacity
/// search resolve to the earliest entry.
const ORIENTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// Best packing found for a (slot, SKU) dimension pair.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fit {
    /// Maximum whole units the slot can hold.
    pub units: usize,
    /// Winning oriented SKU dimensions along the slot's X/Y/Z axes.
    pub orientation: Vector3<f64>,
    /// Unit counts along each slot axis.
    pub grid: Grid,
}

/// Searches all 6 axis-aligned orientations of `sku_dims` and returns the
/// one that packs the most whole units into `slot_dims`, or `None` when no
/// orientation fits even a single unit.
///
/// Zero fit is an expected outcome the caller must handle, not an error.
/// Only a strictly greater unit count displaces the current best, so ties
/// keep the earliest orientation in enumeration order.
pub fn layered_capacity(slot_dims: &Vector3<f64>, sku_dims: &Vector3<f64>) -> Option<Fit> {
    let mut best: Option<Fit> = None;

    for perm in &ORIENTATIONS {
        let sx = sku_dims[perm[0]];
        let sy = sku_dims[perm[1]];
        let sz = sku_dims[perm[2]];

        let nx = (slot_dims.x / sx).floor() as usize;
        let ny = (slot_dims.y / sy).floor() as usize;
        if nx * ny == 0 {
            continue;
        }

        let nz = (slot_dims.z / sz).floor() as usize;
        if nz == 0 {
            continue;
        }

        let units = nx * ny * nz;
        if best.as_ref().map_or(true, |b| units > b.units) {
            best = Some(Fit {
                units,
                orientation: Vector3::new(sx, sy, sz),
                grid: Grid::new(nx, ny, nz),
            });
        }
    }

    best
}

/// Decomposes an actually assigned unit count (which may be below the
/// grid's capacity) into complete horizontal layers plus one partial layer.
///
/// A zero units-per-layer grid cannot arise from a successful capacity
/// search but must not panic: every unit lands in the partial layer.
pub fn layer_layout(units: usize, grid: Grid) -> Layout {
    let units_per_layer = grid.units_per_layer();
    if units_per_layer == 0 {
        return Layout {
            full_layers: 0,
            units_per_layer: 0,
            partial_units: units,
        };
    }

    Layout {
        full_layers: units / units_per_layer,
        units_per_layer,
        partial_units: units % units_per_layer,
    }
}

/// One horizontal layer as an `ny x nx` occupancy grid.
pub type LayerGrid = Vec<Vec<bool>>;

/// Occupancy matrices for an assigned unit count. Visualization data only;
/// no allocation logic depends on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerMatrices {
    /// One all-true grid per complete layer.
    pub full: Vec<LayerGrid>,
    /// The topmost layer, filled true in row-major order, when units
    /// remain after the complete layers.
    pub partial: Option<LayerGrid>,
}

/// Builds the occupancy matrices for `units` placed into `grid`.
pub fn layer_matrices(units: usize, grid: Grid) -> LayerMatrices {
    let layout = layer_layout(units, grid);

    let full_layer = vec![vec![true; grid.nx]; grid.ny];
    let full = vec![full_layer; layout.full_layers];

    let partial = (layout.partial_units > 0).then(|| {
        let mut layer = vec![vec![false; grid.nx]; grid.ny];
        let mut remaining = layout.partial_units;
        'rows: for row in layer.iter_mut() {
            for cell in row.iter_mut() {
                if remaining == 0 {
                    break 'rows;
                }
                *cell = true;
                remaining -= 1;
            }
        }
        layer
    });

    LayerMatrices { full, partial }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_capacity_best_orientation() {
        // 3 * 2 * 4 = 24 beats every other permutation of (300, 400, 500).
        let slot = Vector3::new(1000.0, 1000.0, 2000.0);
        let sku = Vector3::new(300.0, 400.0, 500.0);

        let fit = layered_capacity(&slot, &sku).unwrap();
        assert_eq!(fit.units, 24);
        assert_eq!(fit.grid, Grid::new(3, 2, 4));
        assert_relative_eq!(fit.orientation.x, 300.0);
        assert_relative_eq!(fit.orientation.y, 400.0);
        assert_relative_eq!(fit.orientation.z, 500.0);
    }

    #[test]
    fn test_capacity_grid_product_invariant() {
        let slot = Vector3::new(1200.0, 900.0, 700.0);
        for dims in [
            Vector3::new(100.0, 200.0, 300.0),
            Vector3::new(350.0, 350.0, 350.0),
            Vector3::new(50.0, 600.0, 123.0),
        ] {
            let fit = layered_capacity(&slot, &dims).unwrap();
            assert_eq!(fit.grid.capacity(), fit.units);
            assert!(fit.units > 0);
        }
    }

    #[test]
    fn test_capacity_zero_fit() {
        let slot = Vector3::new(100.0, 100.0, 100.0);
        let sku = Vector3::new(150.0, 150.0, 150.0);
        assert!(layered_capacity(&slot, &sku).is_none());
    }

    #[test]
    fn test_capacity_single_axis_blocks_all_orientations() {
        // One SKU dimension exceeds every slot dimension.
        let slot = Vector3::new(100.0, 200.0, 300.0);
        let sku = Vector3::new(50.0, 50.0, 400.0);
        assert!(layered_capacity(&slot, &sku).is_none());
    }

    #[test]
    fn test_capacity_idempotent() {
        let slot = Vector3::new(1000.0, 1000.0, 2000.0);
        let sku = Vector3::new(300.0, 400.0, 500.0);

        let first = layered_capacity(&slot, &sku);
        let second = layered_capacity(&slot, &sku);
        assert_eq!(first, second);
    }

    #[test]
    fn test_capacity_exact_fit() {
        let slot = Vector3::new(100.0, 100.0, 100.0);
        let sku = Vector3::new(100.0, 100.0, 100.0);

        let fit = layered_capacity(&slot, &sku).unwrap();
        assert_eq!(fit.units, 1);
        assert_eq!(fit.grid, Grid::new(1, 1, 1));
    }

    #[test]
    fn test_layout_identity() {
        let grid = Grid::new(3, 2, 4);
        for units in 0..=grid.capacity() {
            let layout = layer_layout(units, grid);
            assert_eq!(
                layout.full_layers * layout.units_per_layer + layout.partial_units,
                units
            );
            assert!(layout.partial_units < layout.units_per_layer.max(1));
        }
    }

    #[test]
    fn test_layout_degenerate_grid() {
        let layout = layer_layout(7, Grid::new(0, 5, 1));
        assert_eq!(layout.full_layers, 0);
        assert_eq!(layout.units_per_layer, 0);
        assert_eq!(layout.partial_units, 7);
    }

    #[test]
    fn test_matrices_full_only() {
        let m = layer_matrices(12, Grid::new(3, 2, 2));
        assert_eq!(m.full.len(), 2);
        assert!(m.partial.is_none());
        for layer in &m.full {
            assert_eq!(layer.len(), 2);
            assert!(layer.iter().all(|row| row.len() == 3 && row.iter().all(|&c| c)));
        }
    }

    #[test]
    fn test_matrices_partial_row_major() {
        let m = layer_matrices(8, Grid::new(3, 2, 2));
        assert_eq!(m.full.len(), 1);

        let partial = m.partial.unwrap();
        // 2 units fill the first row left to right; second row stays empty.
        assert_eq!(partial[0], vec![true, true, false]);
        assert_eq!(partial[1], vec![false, false, false]);
    }

    #[test]
    fn test_matrices_empty() {
        let m = layer_matrices(0, Grid::new(3, 2, 2));
        assert!(m.full.is_empty());
        assert!(m.partial.is_none());
    }
}
