//! CSV loaders for SKU and slot definitions.
//!
//! Parts files are `;`-delimited with ITEM_ID/LEN_MM/DEP_MM/WID_MM/DEMAND
//! columns; location files are `,`-delimited with per-slot dimensions and
//! positions. All dimensions and positions are millimeters; volumes stay
//! in cubic millimeters throughout.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use slotwise_core::{AbcClass, Sku, Slot, SlotIndex};

/// Errors that can occur when loading warehouse data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to write JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] slotwise_core::Error),
}

/// Raw parts row as it appears in the CSV.
#[derive(Debug, Deserialize)]
struct SkuRow {
    #[serde(rename = "ITEM_ID")]
    item_id: String,
    #[serde(rename = "LEN_MM")]
    len_mm: f64,
    #[serde(rename = "DEP_MM")]
    dep_mm: f64,
    #[serde(rename = "WID_MM")]
    wid_mm: f64,
    #[serde(rename = "DEMAND")]
    demand: f64,
    #[serde(rename = "WEIGHT_KG", default)]
    weight_kg: Option<f64>,
}

/// Raw location row as it appears in the CSV.
#[derive(Debug, Deserialize)]
struct SlotRow {
    loc_inst_code: String,
    loc_type: String,
    width: f64,
    depth: f64,
    height: f64,
    x: f64,
    y: f64,
    z: f64,
}

/// Everything the allocator needs, as produced by the loaders.
#[derive(Debug)]
pub struct WarehouseData {
    /// SKU definitions with ABC classes assigned.
    pub skus: Vec<Sku>,
    /// Empty slots.
    pub slots: Vec<Slot>,
    /// Sum of all slot volumes.
    pub total_capacity: f64,
    /// Id to position lookup over the slots.
    pub index: SlotIndex,
}

/// Loads SKU definitions from a `;`-delimited reader and assigns ABC
/// classes by demand rank: top 20% A, next 30% B, rest C, each class
/// taking at least one SKU.
pub fn load_skus_from_reader<R: Read>(reader: R) -> Result<Vec<Sku>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new().delimiter(b';').from_reader(reader);

    let mut rows: Vec<SkuRow> = Vec::new();
    for row in csv_reader.deserialize() {
        rows.push(row?);
    }

    // Demand-rank classification wants descending demand order.
    rows.sort_by(|a, b| b.demand.total_cmp(&a.demand));

    let n_items = rows.len();
    let n_a = (n_items as f64 * 0.2) as usize;
    let n_b = (n_items as f64 * 0.3) as usize;
    let cut_a = n_a.max(1);
    let cut_b = (cut_a + n_b.max(1)).min(n_items);

    let mut skus = Vec::with_capacity(n_items);
    for (rank, row) in rows.into_iter().enumerate() {
        let class = if rank < cut_a {
            AbcClass::A
        } else if rank < cut_b {
            AbcClass::B
        } else {
            AbcClass::C
        };

        let mut sku = Sku::new(row.item_id, row.len_mm, row.dep_mm, row.wid_mm)
            .with_demand(row.demand)
            .with_abc_class(class);
        if let Some(weight) = row.weight_kg {
            sku = sku.with_mass(weight);
        }

        sku.validate()?;
        skus.push(sku);
    }

    Ok(skus)
}

/// Loads SKU definitions from a `;`-delimited CSV file.
pub fn load_skus(path: impl AsRef<Path>) -> Result<Vec<Sku>, LoadError> {
    load_skus_from_reader(File::open(path)?)
}

/// Loads empty slots from a `,`-delimited reader.
pub fn load_slots_from_reader<R: Read>(reader: R) -> Result<Vec<Slot>, LoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let mut slots = Vec::new();
    for row in csv_reader.deserialize() {
        let row: SlotRow = row?;
        let slot = Slot::new(row.loc_inst_code, row.loc_type, row.width, row.depth, row.height)
            .with_position(row.x, row.y, row.z);
        slot.validate()?;
        slots.push(slot);
    }

    Ok(slots)
}

/// Loads empty slots from a `,`-delimited CSV file.
pub fn load_slots(path: impl AsRef<Path>) -> Result<Vec<Slot>, LoadError> {
    load_slots_from_reader(File::open(path)?)
}

/// Loads parts and locations and derives total capacity and the slot
/// index.
pub fn load_warehouse(
    parts_path: impl AsRef<Path>,
    slots_path: impl AsRef<Path>,
) -> Result<WarehouseData, LoadError> {
    let skus = load_skus(parts_path)?;
    let slots = load_slots(slots_path)?;

    let total_capacity = slots.iter().map(Slot::volume).sum();
    let index = SlotIndex::from_slots(&slots);

    log::debug!(
        "loaded {} SKUs and {} slots, capacity {total_capacity}",
        skus.len(),
        slots.len()
    );

    Ok(WarehouseData {
        skus,
        slots,
        total_capacity,
        index,
    })
}
