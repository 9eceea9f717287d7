//! Per-SKU stock state pooled across assigned slots.

use std::collections::{BTreeMap, HashMap};

use slotwise_core::{AbcClass, Sku, SkuId, Slot};

/// An outstanding replenishment order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenOrder {
    /// Ordered quantity.
    pub qty: usize,
    /// Month the order arrives.
    pub arrival: u32,
}

/// Pooled view of one SKU's stock across every slot assigned to it.
///
/// Holds indices into the shared slot slice rather than slot references,
/// so one caller keeps the single mutable borrow of the slots.
#[derive(Debug, Clone)]
pub struct SkuState {
    /// Demand tier.
    pub abc_class: AbcClass,
    /// Mean demand per month.
    pub mean_demand: f64,
    /// Indices of the slots assigned to this SKU.
    pub slot_indices: Vec<usize>,
    /// Units on hand across all slots.
    pub total_stock: usize,
    /// Unit capacity across all slots.
    pub max_capacity: usize,
    /// Replenishment orders not yet arrived.
    pub open_orders: Vec<OpenOrder>,
}

/// Builds the per-SKU state map from the allocated slots.
///
/// Slots without an assignment, or assigned to a SKU absent from the
/// metadata, are skipped. The map is ordered by SKU id so iteration is
/// deterministic.
pub fn build_sku_states(skus: &[Sku], slots: &[Slot]) -> BTreeMap<SkuId, SkuState> {
    let meta: HashMap<&str, &Sku> = skus.iter().map(|sku| (sku.id().as_str(), sku)).collect();
    let mut states: BTreeMap<SkuId, SkuState> = BTreeMap::new();

    for (idx, slot) in slots.iter().enumerate() {
        let Some(assignment) = slot.assignment() else {
            continue;
        };
        let Some(sku) = meta.get(assignment.sku.as_str()) else {
            continue;
        };

        let state = states
            .entry(assignment.sku.clone())
            .or_insert_with(|| SkuState {
                abc_class: sku.abc_class(),
                mean_demand: sku.demand(),
                slot_indices: Vec::new(),
                total_stock: 0,
                max_capacity: 0,
                open_orders: Vec::new(),
            });

        state.slot_indices.push(idx);
        state.total_stock += assignment.current_stock;
        state.max_capacity += assignment.max_units;
    }

    states
}

/// Ships up to `qty` units from the SKU's slots, front to back.
///
/// Returns `(shipped, lost)`; mutates only `current_stock`.
pub fn consume_stock(state: &mut SkuState, slots: &mut [Slot], qty: usize) -> (usize, usize) {
    let mut remaining = qty;
    let mut shipped = 0;

    for &idx in &state.slot_indices {
        if remaining == 0 {
            break;
        }
        let Some(assignment) = slots[idx].assignment_mut() else {
            continue;
        };

        let take = assignment.current_stock.min(remaining);
        if take == 0 {
            continue;
        }
        assignment.current_stock -= take;
        state.total_stock -= take;
        shipped += take;
        remaining -= take;
    }

    (shipped, remaining)
}

/// Puts up to `qty` units away into the SKU's slots, front to back.
///
/// Returns the quantity actually stored; overflow beyond the slots'
/// capacity is dropped. Mutates only `current_stock`.
pub fn add_stock(state: &mut SkuState, slots: &mut [Slot], qty: usize) -> usize {
    let mut remaining = qty;
    let mut added = 0;

    for &idx in &state.slot_indices {
        if remaining == 0 {
            break;
        }
        let Some(assignment) = slots[idx].assignment_mut() else {
            continue;
        };

        let free = assignment.max_units - assignment.current_stock;
        let put = free.min(remaining);
        if put == 0 {
            continue;
        }
        assignment.current_stock += put;
        state.total_stock += put;
        added += put;
        remaining -= put;
    }

    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;
    use slotwise_core::{Assignment, Grid, Layout};

    fn slot_with_stock(id: &str, sku: &str, stock: usize, max: usize) -> Slot {
        let mut slot = Slot::new(id, "rack", 1000.0, 1000.0, 1000.0);
        slot.assign(Assignment {
            sku: sku.to_string(),
            max_units: max,
            init_units: stock,
            current_stock: stock,
            orientation: Vector3::new(100.0, 100.0, 100.0),
            grid: Grid::new(10, 10, max / 100),
            layout: Layout {
                full_layers: 0,
                units_per_layer: 100,
                partial_units: stock,
            },
            stored_volume: stock as f64 * 1_000_000.0,
        })
        .unwrap();
        slot
    }

    fn fixture() -> (Vec<Sku>, Vec<Slot>) {
        let skus = vec![
            Sku::new("S1", 100.0, 100.0, 100.0)
                .with_demand(40.0)
                .with_abc_class(AbcClass::A),
            Sku::new("S2", 100.0, 100.0, 100.0)
                .with_demand(10.0)
                .with_abc_class(AbcClass::C),
        ];
        let slots = vec![
            slot_with_stock("L1", "S1", 50, 100),
            slot_with_stock("L2", "S1", 30, 100),
            slot_with_stock("L3", "S2", 20, 200),
            Slot::new("L4", "rack", 500.0, 500.0, 500.0),
        ];
        (skus, slots)
    }

    #[test]
    fn test_build_states_pools_slots() {
        let (skus, slots) = fixture();
        let states = build_sku_states(&skus, &slots);

        assert_eq!(states.len(), 2);

        let s1 = &states["S1"];
        assert_eq!(s1.slot_indices, vec![0, 1]);
        assert_eq!(s1.total_stock, 80);
        assert_eq!(s1.max_capacity, 200);
        assert_eq!(s1.abc_class, AbcClass::A);

        let s2 = &states["S2"];
        assert_eq!(s2.total_stock, 20);
    }

    #[test]
    fn test_consume_walks_slots() {
        let (skus, mut slots) = fixture();
        let mut states = build_sku_states(&skus, &slots);

        let state = states.get_mut("S1").unwrap();
        let (shipped, lost) = consume_stock(state, &mut slots, 60);

        assert_eq!(shipped, 60);
        assert_eq!(lost, 0);
        assert_eq!(state.total_stock, 20);
        // First slot drained, second partially consumed.
        assert_eq!(slots[0].assignment().unwrap().current_stock, 0);
        assert_eq!(slots[1].assignment().unwrap().current_stock, 20);
    }

    #[test]
    fn test_consume_reports_lost_demand() {
        let (skus, mut slots) = fixture();
        let mut states = build_sku_states(&skus, &slots);

        let state = states.get_mut("S2").unwrap();
        let (shipped, lost) = consume_stock(state, &mut slots, 50);

        assert_eq!(shipped, 20);
        assert_eq!(lost, 30);
        assert_eq!(state.total_stock, 0);
    }

    #[test]
    fn test_add_stock_clamps_at_capacity() {
        let (skus, mut slots) = fixture();
        let mut states = build_sku_states(&skus, &slots);

        let state = states.get_mut("S1").unwrap();
        let added = add_stock(state, &mut slots, 500);

        // 200 capacity across both slots, 80 already on hand.
        assert_eq!(added, 120);
        assert_eq!(state.total_stock, 200);
        for idx in [0, 1] {
            let assignment = slots[idx].assignment().unwrap();
            assert!(assignment.current_stock <= assignment.max_units);
        }
    }
}
