//! Report writers: console summaries and CSV/JSON exports.
//!
//! Every writer takes `impl io::Write`, so callers choose between stdout,
//! files and in-memory buffers. Volumes are written raw, in the linear
//! unit of the input data.

use std::collections::BTreeMap;
use std::io::{self, Write};

use slotwise_alloc::{layer_matrices, AllocationScore, LayerGrid};
use slotwise_core::{SkuId, Slot, UnallocatedSku};
use slotwise_sim::{summarize, SkuKpi};

use crate::loader::LoadError;

/// Renders one occupancy layer as rows of `[X]`/`[ ]` cells.
pub fn ascii_layer(layer: &LayerGrid) -> String {
    let mut rendered = String::new();
    for row in layer {
        rendered.push_str("      ");
        for &cell in row {
            rendered.push_str(if cell { "[X]" } else { "[ ]" });
        }
        rendered.push('\n');
    }
    rendered
}

/// Writes the per-slot allocation summary followed by warehouse totals.
pub fn write_initial_state<W: Write>(
    out: &mut W,
    slots: &[Slot],
    total_capacity: f64,
    used_volume: f64,
    max_rows: usize,
) -> io::Result<()> {
    writeln!(out, "--- WAREHOUSE INITIALIZATION ---\n")?;

    let assigned: Vec<&Slot> = slots.iter().filter(|slot| slot.is_assigned()).collect();

    for (i, slot) in assigned.iter().take(max_rows).enumerate() {
        let Some(assignment) = slot.assignment() else {
            continue;
        };
        let grid = assignment.grid;
        let layout = assignment.layout;

        let mut layout_desc = format!("{} x {} x {}", grid.nx, grid.ny, layout.full_layers);
        if layout.partial_units > 0 {
            layout_desc.push_str(&format!(" + {} units on last layer", layout.partial_units));
        }

        writeln!(
            out,
            "{}. Location: {} | Type: {} | SKU: {}",
            i + 1,
            slot.id(),
            slot.kind(),
            assignment.sku
        )?;
        writeln!(
            out,
            "   Slot position: X={}, Y={}, Z={}",
            slot.position().x,
            slot.position().y,
            slot.position().z
        )?;
        writeln!(
            out,
            "   Initial allocation: {} / {} units",
            assignment.init_units, assignment.max_units
        )?;
        writeln!(
            out,
            "   Grid capacity (X x Y x Z): {} x {} x {}",
            grid.nx, grid.ny, grid.nz
        )?;
        writeln!(out, "   Allocation layout: {layout_desc}")?;
        writeln!(
            out,
            "   Product orientation: (X={}, Y={}, Z={})",
            assignment.orientation.x, assignment.orientation.y, assignment.orientation.z
        )?;

        let matrices = layer_matrices(assignment.init_units, grid);
        if let Some(partial) = matrices.partial {
            writeln!(out, "   Partial layer (Z = {}):", layout.full_layers + 1)?;
            out.write_all(ascii_layer(&partial).as_bytes())?;
        } else {
            writeln!(out, "   All layers full.")?;
        }
        writeln!(out)?;
    }

    let utilization_pct = if total_capacity > 0.0 {
        used_volume / total_capacity * 100.0
    } else {
        0.0
    };

    writeln!(out, "--- INITIAL SUMMARY ---")?;
    writeln!(out, "Total rack volume: {total_capacity:.0}")?;
    writeln!(out, "Used volume:       {used_volume:.0}")?;
    writeln!(out, "Utilization:       {utilization_pct:.2}%")?;
    writeln!(out, "Allocated slots:   {} / {}", assigned.len(), slots.len())?;

    Ok(())
}

/// Writes one CSV row per assigned slot with allocation and geometry info.
pub fn export_allocations_csv<W: Write>(out: W, slots: &[Slot]) -> Result<(), LoadError> {
    let mut writer = csv::Writer::from_writer(out);

    writer.write_record([
        "LOCATION_ID",
        "LOCATION_TYPE",
        "SKU",
        "POS_X_MM",
        "POS_Y_MM",
        "POS_Z_MM",
        "INIT_UNITS",
        "CURRENT_STOCK",
        "MAX_UNITS",
        "GRID_X",
        "GRID_Y",
        "GRID_Z",
        "FULL_LAYERS",
        "PARTIAL_UNITS",
        "ORIENT_X_MM",
        "ORIENT_Y_MM",
        "ORIENT_Z_MM",
        "LOCATION_VOL_MM3",
        "STORED_VOL_MM3",
    ])?;

    for slot in slots {
        let Some(assignment) = slot.assignment() else {
            continue;
        };

        writer.write_record([
            slot.id().clone(),
            slot.kind().to_string(),
            assignment.sku.clone(),
            slot.position().x.to_string(),
            slot.position().y.to_string(),
            slot.position().z.to_string(),
            assignment.init_units.to_string(),
            assignment.current_stock.to_string(),
            assignment.max_units.to_string(),
            assignment.grid.nx.to_string(),
            assignment.grid.ny.to_string(),
            assignment.grid.nz.to_string(),
            assignment.layout.full_layers.to_string(),
            assignment.layout.partial_units.to_string(),
            assignment.orientation.x.to_string(),
            assignment.orientation.y.to_string(),
            assignment.orientation.z.to_string(),
            slot.volume().to_string(),
            assignment.stored_volume.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes one CSV row per SKU that could not be allocated.
pub fn export_unallocated_csv<W: Write>(
    out: W,
    unallocated: &[UnallocatedSku],
) -> Result<(), LoadError> {
    let mut writer = csv::Writer::from_writer(out);

    writer.write_record(["ITEM_ID", "LEN_MM", "DEP_MM", "WID_MM", "VOLUME_MM3"])?;
    for record in unallocated {
        writer.write_record([
            record.id.clone(),
            record.dimensions.x.to_string(),
            record.dimensions.y.to_string(),
            record.dimensions.z.to_string(),
            record.volume.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the allocation score as pretty JSON.
pub fn export_score_json<W: Write>(out: W, score: &AllocationScore) -> Result<(), LoadError> {
    serde_json::to_writer_pretty(out, score)?;
    Ok(())
}

/// Writes the simulation KPI summary.
pub fn write_simulation_summary<W: Write>(
    out: &mut W,
    kpis: &BTreeMap<SkuId, SkuKpi>,
) -> io::Result<()> {
    let summary = summarize(kpis);

    writeln!(out, "--- SIMULATION SUMMARY ---")?;
    writeln!(out, "SKUs simulated: {}", summary.skus)?;
    writeln!(out, "Total demand:   {}", summary.total_demand)?;
    writeln!(out, "Total shipped:  {}", summary.total_shipped)?;
    writeln!(out, "Total lost:     {}", summary.total_lost)?;

    if summary.total_demand > 0 {
        writeln!(out, "Fill rate (service level): {:.2}%", summary.fill_rate_pct())?;
    } else {
        writeln!(out, "No demand generated.")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;
    use slotwise_core::{Assignment, Grid, Layout};

    fn assigned_slot() -> Slot {
        let mut slot =
            Slot::new("L1", "rack", 1000.0, 1000.0, 2000.0).with_position(0.0, 50.0, 0.0);
        slot.assign(Assignment {
            sku: "S1".to_string(),
            max_units: 24,
            init_units: 20,
            current_stock: 20,
            orientation: Vector3::new(300.0, 400.0, 500.0),
            grid: Grid::new(3, 2, 4),
            layout: Layout {
                full_layers: 3,
                units_per_layer: 6,
                partial_units: 2,
            },
            stored_volume: 20.0 * 60_000_000.0,
        })
        .unwrap();
        slot
    }

    #[test]
    fn test_ascii_layer() {
        let layer = vec![vec![true, true, false], vec![false, false, false]];
        let rendered = ascii_layer(&layer);
        assert_eq!(rendered, "      [X][X][ ]\n      [ ][ ][ ]\n");
    }

    #[test]
    fn test_initial_state_mentions_slot_and_partial_layer() {
        let slots = vec![assigned_slot(), Slot::new("L2", "bin", 10.0, 10.0, 10.0)];
        let mut out = Vec::new();

        write_initial_state(&mut out, &slots, 4e9, 1.2e9, 50).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Location: L1"));
        assert!(text.contains("Initial allocation: 20 / 24 units"));
        assert!(text.contains("Partial layer (Z = 4):"));
        assert!(text.contains("Allocated slots:   1 / 2"));
    }

    #[test]
    fn test_allocations_csv_round_trips() {
        let slots = vec![assigned_slot(), Slot::new("L2", "bin", 10.0, 10.0, 10.0)];
        let mut out = Vec::new();

        export_allocations_csv(&mut out, &slots).unwrap();

        let mut reader = csv::Reader::from_reader(out.as_slice());
        let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>().unwrap();

        // Only the assigned slot is exported.
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "L1");
        assert_eq!(&rows[0][2], "S1");
        assert_eq!(&rows[0][8], "24");
    }

    #[test]
    fn test_unallocated_csv() {
        let unallocated = vec![UnallocatedSku {
            id: "GIANT".to_string(),
            dimensions: Vector3::new(5000.0, 5000.0, 5000.0),
            volume: 1.25e11,
        }];
        let mut out = Vec::new();

        export_unallocated_csv(&mut out, &unallocated).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("ITEM_ID,LEN_MM,DEP_MM,WID_MM,VOLUME_MM3"));
        assert!(text.contains("GIANT,5000,5000,5000,125000000000"));
    }

    #[test]
    fn test_score_json_parses_back() {
        let slots = vec![assigned_slot()];
        let score = slotwise_alloc::score_allocation(&slots, 4e9, 1.2e9, &[]);

        let mut out = Vec::new();
        export_score_json(&mut out, &score).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["slots_allocated"], 1);
        assert!(value["utilization_pct"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_simulation_summary_output() {
        let mut kpis = BTreeMap::new();
        kpis.insert(
            "S1".to_string(),
            SkuKpi {
                demand: 100,
                shipped: 90,
                lost: 10,
            },
        );

        let mut out = Vec::new();
        write_simulation_summary(&mut out, &kpis).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Total demand:   100"));
        assert!(text.contains("Fill rate (service level): 90.00%"));
    }
}
