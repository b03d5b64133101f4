//! # Brick Wall Calculation
//!
//! Bricks and mortar for a solid wall. Every brick occupies its own volume
//! plus one mortar joint on each of three faces; whatever is left of the wall
//! volume after the bricks is mortar.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::brick::{calculate, BrickInput};
//!
//! // One cubic metre of standard 250 × 120 × 65 brickwork with 10 mm joints
//! let input = BrickInput {
//!     wall_length: 1.0,
//!     wall_height: 4.0,
//!     openings_area: 0.0,
//!     wall_thickness: 250.0,
//!     brick_length: 250.0,
//!     brick_width: 120.0,
//!     brick_height: 65.0,
//!     joint: 10.0,
//!     waste_percent: 0.0,
//! };
//! assert_eq!(calculate(&input).unwrap().bricks, 395);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{CalculatorId, Category};
use crate::definitions::{CalculatorDefinition, FieldKind, FieldSpec, ResultSpec, UsageExample};
use crate::errors::{CalcError, CalcResult};
use crate::units::{ceil_count, with_waste, CubicMeters, Meters, Millimeters};
use crate::validation::validate_typed;
use crate::values::Values;

/// Input parameters for a brick wall.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickInput {
    /// Wall length (m)
    pub wall_length: f64,
    /// Wall height (m)
    pub wall_height: f64,
    /// Doors and windows (m²)
    pub openings_area: f64,
    /// Wall thickness (mm), e.g. 120 for half a brick, 250 for one brick
    pub wall_thickness: f64,
    /// Brick length (mm)
    pub brick_length: f64,
    /// Brick width (mm)
    pub brick_width: f64,
    /// Brick height (mm)
    pub brick_height: f64,
    /// Mortar joint (mm)
    pub joint: f64,
    /// Waste margin for broken bricks (%)
    pub waste_percent: f64,
}

impl BrickInput {
    pub fn from_values(values: &Values) -> CalcResult<Self> {
        Ok(BrickInput {
            wall_length: values.require("wall_length")?,
            wall_height: values.require("wall_height")?,
            openings_area: values.require("openings_area")?,
            wall_thickness: values.require("wall_thickness")?,
            brick_length: values.require("brick_length")?,
            brick_width: values.require("brick_width")?,
            brick_height: values.require("brick_height")?,
            joint: values.require("joint")?,
            waste_percent: values.require("waste_percent")?,
        })
    }

    fn brick_volume(&self, joint_mm: f64) -> CubicMeters {
        let length: Meters = Millimeters(self.brick_length + joint_mm).into();
        let width: Meters = Millimeters(self.brick_width + joint_mm).into();
        let height: Meters = Millimeters(self.brick_height + joint_mm).into();
        length * width * height
    }
}

/// Brick wall estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickResult {
    /// Net wall face (m²)
    pub wall_area: f64,
    /// Masonry volume (m³)
    pub wall_volume: f64,
    /// Bricks to buy
    pub bricks: u64,
    /// Mortar (m³)
    pub mortar_volume: f64,
}

pub fn calculate(input: &BrickInput) -> CalcResult<BrickResult> {
    validate_typed(CalculatorId::Brick, input)?;

    let gross = input.wall_length * input.wall_height;
    if input.openings_area >= gross {
        return Err(CalcError::invalid_input(
            "openings_area",
            input.openings_area.to_string(),
            format!("must be smaller than the wall area of {:.2} m²", gross),
        ));
    }

    let wall_area = gross - input.openings_area;
    let thickness: Meters = Millimeters(input.wall_thickness).into();
    let wall_volume = wall_area * thickness.value();

    let bricks_net = wall_volume / input.brick_volume(input.joint).value();
    let mortar_volume = (wall_volume - bricks_net * input.brick_volume(0.0).value()).max(0.0);

    Ok(BrickResult {
        wall_area,
        wall_volume,
        bricks: CalculatorId::Brick.count(
            "bricks",
            ceil_count(with_waste(bricks_net, input.waste_percent)),
        )?,
        mortar_volume,
    })
}

pub fn definition() -> CalculatorDefinition {
    CalculatorDefinition {
        id: CalculatorId::Brick,
        category: Category::Masonry,
        title: "Brickwork",
        description: "Bricks and mortar for a solid brick wall",
        inputs: vec![
            FieldSpec::new("wall_length", "Wall length", "m", FieldKind::Length, 10.0),
            FieldSpec::new("wall_height", "Wall height", "m", FieldKind::Length, 2.7).max(30.0),
            FieldSpec::new("openings_area", "Doors and windows", "m²", FieldKind::Area, 0.0)
                .optional()
                .allow_zero(),
            FieldSpec::new("wall_thickness", "Wall thickness", "mm", FieldKind::Dimension, 250.0).max(1_000.0),
            FieldSpec::new("brick_length", "Brick length", "mm", FieldKind::Dimension, 250.0).max(500.0),
            FieldSpec::new("brick_width", "Brick width", "mm", FieldKind::Dimension, 120.0).max(500.0),
            FieldSpec::new("brick_height", "Brick height", "mm", FieldKind::Dimension, 65.0).max(500.0),
            FieldSpec::new("joint", "Mortar joint", "mm", FieldKind::Dimension, 10.0)
                .allow_zero()
                .max(30.0),
            FieldSpec::new("waste_percent", "Waste margin", "%", FieldKind::Percentage, 5.0),
        ],
        results: vec![
            ResultSpec::new("wall_area", "Wall area", "m²", 2),
            ResultSpec::new("wall_volume", "Masonry volume", "m³", 3),
            ResultSpec::count("bricks", "Bricks"),
            ResultSpec::new("mortar_volume", "Mortar", "m³", 3),
        ],
        examples: vec![
            UsageExample::new(
                "One-brick garage wall",
                [
                    ("wall_length", 10.0),
                    ("wall_height", 2.7),
                    ("wall_thickness", 250.0),
                    ("brick_length", 250.0),
                    ("brick_width", 120.0),
                    ("brick_height", 65.0),
                    ("joint", 10.0),
                    ("waste_percent", 5.0),
                ],
            ),
            UsageExample::new(
                "Half-brick partition with a door",
                [
                    ("wall_length", 4.0),
                    ("wall_height", 2.6),
                    ("openings_area", 1.8),
                    ("wall_thickness", 120.0),
                    ("brick_length", 250.0),
                    ("brick_width", 120.0),
                    ("brick_height", 88.0),
                    ("joint", 10.0),
                    ("waste_percent", 5.0),
                ],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn garage_wall() -> BrickInput {
        BrickInput {
            wall_length: 10.0,
            wall_height: 2.7,
            openings_area: 0.0,
            wall_thickness: 250.0,
            brick_length: 250.0,
            brick_width: 120.0,
            brick_height: 65.0,
            joint: 10.0,
            waste_percent: 0.0,
        }
    }

    #[test]
    fn test_bricks_and_mortar() {
        let result = calculate(&garage_wall()).unwrap();
        // 6.75 m³ / (0.26 × 0.13 × 0.075) = 2662.7 → 2663
        assert!((result.wall_volume - 6.75).abs() < 1e-9);
        assert_eq!(result.bricks, 2663);
        // 6.75 − 2662.72 × 0.00195 = 1.5577 m³
        assert!((result.mortar_volume - 1.5577).abs() < 1e-3);
    }

    #[test]
    fn test_waste_applies_to_bricks_only() {
        let mut input = garage_wall();
        input.waste_percent = 5.0;
        let result = calculate(&input).unwrap();
        // 2662.72 × 1.05 = 2795.9 → 2796
        assert_eq!(result.bricks, 2796);
        assert!((result.mortar_volume - 1.5577).abs() < 1e-3);
    }

    #[test]
    fn test_dry_stacked_has_no_mortar() {
        let mut input = garage_wall();
        input.joint = 0.0;
        input.wall_thickness = 120.0;
        let result = calculate(&input).unwrap();
        assert!(result.mortar_volume.abs() < 1e-9);
    }

    #[test]
    fn test_openings_filling_the_wall_rejected() {
        let mut input = garage_wall();
        input.openings_area = 27.0;
        assert_eq!(calculate(&input).unwrap_err().field(), Some("openings_area"));

        input.openings_area = 26.9;
        assert!(calculate(&input).is_ok());
    }
}
