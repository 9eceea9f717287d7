//! SKU (stock-keeping unit) types.

use std::fmt;

use nalgebra::Vector3;

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for a SKU.
pub type SkuId = String;

/// Demand-based tier, assigned externally from the demand ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AbcClass {
    /// Fast movers (top of the demand ranking).
    A,
    /// Mid movers.
    B,
    /// Slow movers.
    #[default]
    C,
}

impl AbcClass {
    /// Returns the single-letter class label.
    pub fn as_str(&self) -> &'static str {
        match self {
            AbcClass::A => "A",
            AbcClass::B => "B",
            AbcClass::C => "C",
        }
    }
}

impl fmt::Display for AbcClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stock-keeping item type with fixed box dimensions.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sku {
    /// Unique identifier.
    id: SkuId,

    /// Dimensions (length, depth, width) in the warehouse linear unit.
    dimensions: Vector3<f64>,

    /// Mean demand per period.
    demand: f64,

    /// Mass of one unit.
    mass: Option<f64>,

    /// Demand tier.
    abc_class: AbcClass,
}

impl Sku {
    /// Creates a new SKU with the given id and dimensions.
    pub fn new(id: impl Into<SkuId>, length: f64, depth: f64, width: f64) -> Self {
        Self {
            id: id.into(),
            dimensions: Vector3::new(length, depth, width),
            demand: 0.0,
            mass: None,
            abc_class: AbcClass::default(),
        }
    }

    /// Sets the mean demand per period.
    pub fn with_demand(mut self, demand: f64) -> Self {
        self.demand = demand;
        self
    }

    /// Sets the unit mass.
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    /// Sets the demand tier.
    pub fn with_abc_class(mut self, class: AbcClass) -> Self {
        self.abc_class = class;
        self
    }

    /// Returns the identifier.
    pub fn id(&self) -> &SkuId {
        &self.id
    }

    /// Returns the dimensions (length, depth, width).
    pub fn dimensions(&self) -> &Vector3<f64> {
        &self.dimensions
    }

    /// Returns the length.
    pub fn length(&self) -> f64 {
        self.dimensions.x
    }

    /// Returns the depth.
    pub fn depth(&self) -> f64 {
        self.dimensions.y
    }

    /// Returns the width.
    pub fn width(&self) -> f64 {
        self.dimensions.z
    }

    /// Returns the mean demand per period.
    pub fn demand(&self) -> f64 {
        self.demand
    }

    /// Returns the unit mass.
    pub fn mass(&self) -> Option<f64> {
        self.mass
    }

    /// Returns the demand tier.
    pub fn abc_class(&self) -> AbcClass {
        self.abc_class
    }

    /// Volume of one unit: the exact product of the dimensions, never
    /// rounded.
    pub fn volume(&self) -> f64 {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }

    /// Largest single dimension. Used to rank placement difficulty.
    pub fn max_dimension(&self) -> f64 {
        self.dimensions.x.max(self.dimensions.y).max(self.dimensions.z)
    }

    /// Validates the SKU definition.
    pub fn validate(&self) -> Result<()> {
        if self.dimensions.x <= 0.0 || self.dimensions.y <= 0.0 || self.dimensions.z <= 0.0 {
            return Err(Error::InvalidSku(format!(
                "All dimensions for '{}' must be positive",
                self.id
            )));
        }

        if let Some(mass) = self.mass {
            if mass < 0.0 {
                return Err(Error::InvalidSku(format!(
                    "Mass for '{}' cannot be negative",
                    self.id
                )));
            }
        }

        Ok(())
    }
}

/// Record for a SKU no slot could hold, echoing its original geometry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnallocatedSku {
    /// The SKU identifier.
    pub id: SkuId,
    /// Original dimensions.
    pub dimensions: Vector3<f64>,
    /// Unit volume.
    pub volume: f64,
}

impl UnallocatedSku {
    /// Builds a record from a SKU.
    pub fn from_sku(sku: &Sku) -> Self {
        Self {
            id: sku.id().clone(),
            dimensions: *sku.dimensions(),
            volume: sku.volume(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sku_volume() {
        let sku = Sku::new("S1", 300.0, 400.0, 500.0);
        assert_relative_eq!(sku.volume(), 60_000_000.0, epsilon = 0.001);
    }

    #[test]
    fn test_max_dimension() {
        let sku = Sku::new("S1", 300.0, 500.0, 400.0);
        assert_relative_eq!(sku.max_dimension(), 500.0);
    }

    #[test]
    fn test_validation() {
        let valid = Sku::new("S1", 10.0, 20.0, 30.0);
        assert!(valid.validate().is_ok());

        let invalid = Sku::new("S2", -10.0, 20.0, 30.0);
        assert!(invalid.validate().is_err());

        let negative_mass = Sku::new("S3", 10.0, 20.0, 30.0).with_mass(-1.0);
        assert!(negative_mass.validate().is_err());
    }

    #[test]
    fn test_unallocated_echoes_geometry() {
        let sku = Sku::new("S1", 1.0, 2.0, 3.0).with_demand(5.0);
        let record = UnallocatedSku::from_sku(&sku);

        assert_eq!(record.id, "S1");
        assert_eq!(record.dimensions, *sku.dimensions());
        assert_relative_eq!(record.volume, 6.0);
    }

    #[test]
    fn test_abc_labels() {
        assert_eq!(AbcClass::A.as_str(), "A");
        assert_eq!(AbcClass::B.to_string(), "B");
        assert_eq!(AbcClass::default(), AbcClass::C);
    }
}
