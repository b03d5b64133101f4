//! # Tile Calculation
//!
//! Tiles and boxes for a floor or wall. Each tile is counted with half a
//! joint on every side, so the effective module is `(length + joint) × (width + joint)`.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::tile::{calculate, TileInput};
//!
//! let input = TileInput {
//!     area: 10.0,
//!     tile_length: 300.0,
//!     tile_width: 300.0,
//!     joint_width: 0.0,
//!     tiles_per_box: 10.0,
//!     waste_percent: 0.0,
//! };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.tiles, 112);
//! assert_eq!(result.boxes, 12);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{CalculatorId, Category};
use crate::definitions::{CalculatorDefinition, FieldKind, FieldSpec, ResultSpec, UsageExample};
use crate::errors::CalcResult;
use crate::units::{ceil_count, with_waste, Meters, Millimeters};
use crate::validation::validate_typed;
use crate::values::Values;

/// Input parameters for a tile estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileInput {
    /// Surface to tile (m²)
    pub area: f64,
    /// Tile length (mm)
    pub tile_length: f64,
    /// Tile width (mm)
    pub tile_width: f64,
    /// Grout joint width (mm)
    pub joint_width: f64,
    /// Tiles in one box
    pub tiles_per_box: f64,
    /// Waste margin for cuts and breakage (%)
    pub waste_percent: f64,
}

impl TileInput {
    pub fn from_values(values: &Values) -> CalcResult<Self> {
        Ok(TileInput {
            area: values.require("area")?,
            tile_length: values.require("tile_length")?,
            tile_width: values.require("tile_width")?,
            joint_width: values.require("joint_width")?,
            tiles_per_box: f64::from(values.count("tiles_per_box")?),
            waste_percent: values.require("waste_percent")?,
        })
    }

    /// Area covered by one tile including its joint (m²)
    pub fn module_area(&self) -> f64 {
        let length: Meters = Millimeters(self.tile_length + self.joint_width).into();
        let width: Meters = Millimeters(self.tile_width + self.joint_width).into();
        (length * width).value()
    }
}

/// Tile estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileResult {
    /// Area of one tile with joint (m²)
    pub tile_area: f64,
    /// Tiles to buy
    pub tiles: u64,
    /// Boxes to buy
    pub boxes: u64,
}

pub fn calculate(input: &TileInput) -> CalcResult<TileResult> {
    validate_typed(CalculatorId::Tile, input)?;

    let tile_area = input.module_area();
    let tiles = CalculatorId::Tile.count(
        "tiles",
        ceil_count(with_waste(input.area / tile_area, input.waste_percent)),
    )?;

    Ok(TileResult {
        tile_area,
        tiles,
        boxes: CalculatorId::Tile.count("boxes", ceil_count(tiles as f64 / input.tiles_per_box))?,
    })
}

pub fn definition() -> CalculatorDefinition {
    CalculatorDefinition {
        id: CalculatorId::Tile,
        category: Category::Finishing,
        title: "Tiles",
        description: "Ceramic or porcelain tiles and boxes for a floor or wall",
        inputs: vec![
            FieldSpec::new("area", "Surface area", "m²", FieldKind::Area, 10.0),
            FieldSpec::new("tile_length", "Tile length", "mm", FieldKind::Dimension, 300.0).max(3_000.0),
            FieldSpec::new("tile_width", "Tile width", "mm", FieldKind::Dimension, 300.0).max(3_000.0),
            FieldSpec::new("joint_width", "Joint width", "mm", FieldKind::Dimension, 2.0)
                .allow_zero()
                .max(20.0),
            FieldSpec::new("tiles_per_box", "Tiles per box", "pcs", FieldKind::Count, 10.0).max(1_000.0),
            FieldSpec::new("waste_percent", "Waste margin", "%", FieldKind::Percentage, 10.0),
        ],
        results: vec![
            ResultSpec::new("tile_area", "Tile area with joint", "m²", 4),
            ResultSpec::count("tiles", "Tiles"),
            ResultSpec::new("boxes", "Boxes", "boxes", 0),
        ],
        examples: vec![
            UsageExample::new(
                "Bathroom floor, 300 × 300 tiles",
                [
                    ("area", 6.0),
                    ("tile_length", 300.0),
                    ("tile_width", 300.0),
                    ("joint_width", 2.0),
                    ("tiles_per_box", 11.0),
                    ("waste_percent", 10.0),
                ],
            ),
            UsageExample::new(
                "Kitchen backsplash, 200 × 100 metro tiles laid diagonally",
                [
                    ("area", 3.2),
                    ("tile_length", 200.0),
                    ("tile_width", 100.0),
                    ("joint_width", 1.5),
                    ("tiles_per_box", 40.0),
                    ("waste_percent", 15.0),
                ],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> TileInput {
        TileInput {
            area: 10.0,
            tile_length: 300.0,
            tile_width: 300.0,
            joint_width: 2.0,
            tiles_per_box: 10.0,
            waste_percent: 10.0,
        }
    }

    #[test]
    fn test_with_joint_and_waste() {
        let result = calculate(&floor()).unwrap();
        // 0.302 × 0.302 = 0.091204 m²; 10 / 0.091204 × 1.1 = 120.6 → 121
        assert!((result.tile_area - 0.091204).abs() < 1e-9);
        assert_eq!(result.tiles, 121);
        assert_eq!(result.boxes, 13);
    }

    #[test]
    fn test_waste_only() {
        let mut input = floor();
        input.joint_width = 0.0;
        // 10 / 0.09 × 1.1 = 122.2 → 123
        assert_eq!(calculate(&input).unwrap().tiles, 123);
    }

    #[test]
    fn test_oversized_joint_rejected() {
        let mut input = floor();
        input.joint_width = 25.0;
        assert_eq!(calculate(&input).unwrap_err().field(), Some("joint_width"));
    }
}
