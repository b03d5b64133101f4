//! # Aerated Concrete Block Calculation
//!
//! Blocks and thin-joint adhesive for an aerated (autoclaved) concrete wall.
//! Thin-bed joints are 2-3 mm, so blocks are counted by face area alone.

use serde::{Deserialize, Serialize};

use crate::calculations::{CalculatorId, Category};
use crate::definitions::{CalculatorDefinition, FieldKind, FieldSpec, ResultSpec, UsageExample};
use crate::errors::{CalcError, CalcResult};
use crate::units::{ceil_count, with_waste, Meters, Millimeters};
use crate::validation::validate_typed;
use crate::values::Values;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AeratedBlockInput {
    /// Wall length (m)
    pub wall_length: f64,
    /// Wall height (m)
    pub wall_height: f64,
    /// Doors and windows (m²)
    pub openings_area: f64,
    /// Block length (mm)
    pub block_length: f64,
    /// Block height (mm)
    pub block_height: f64,
    /// Block thickness, which is also the wall thickness (mm)
    pub block_thickness: f64,
    /// Adhesive per m³ of masonry (kg)
    pub glue_consumption: f64,
    /// Adhesive bag weight (kg)
    pub bag_weight: f64,
    /// Waste margin (%)
    pub waste_percent: f64,
}

impl AeratedBlockInput {
    pub fn from_values(values: &Values) -> CalcResult<Self> {
        Ok(AeratedBlockInput {
            wall_length: values.require("wall_length")?,
            wall_height: values.require("wall_height")?,
            openings_area: values.require("openings_area")?,
            block_length: values.require("block_length")?,
            block_height: values.require("block_height")?,
            block_thickness: values.require("block_thickness")?,
            glue_consumption: values.require("glue_consumption")?,
            bag_weight: values.require("bag_weight")?,
            waste_percent: values.require("waste_percent")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AeratedBlockResult {
    /// Net wall face (m²)
    pub wall_area: f64,
    /// Masonry volume (m³)
    pub wall_volume: f64,
    /// Blocks to buy
    pub blocks: u64,
    /// Adhesive (kg)
    pub glue_kg: f64,
    /// Adhesive bags
    pub glue_bags: u64,
}

pub fn calculate(input: &AeratedBlockInput) -> CalcResult<AeratedBlockResult> {
    validate_typed(CalculatorId::AeratedBlock, input)?;

    let gross = input.wall_length * input.wall_height;
    if input.openings_area >= gross {
        return Err(CalcError::invalid_input(
            "openings_area",
            input.openings_area.to_string(),
            format!("must be smaller than the wall area of {:.2} m²", gross),
        ));
    }

    let wall_area = gross - input.openings_area;
    let block_length: Meters = Millimeters(input.block_length).into();
    let block_height: Meters = Millimeters(input.block_height).into();
    let thickness: Meters = Millimeters(input.block_thickness).into();
    let face = block_length * block_height;

    let wall_volume = wall_area * thickness.value();
    let glue_kg = wall_volume * input.glue_consumption;

    Ok(AeratedBlockResult {
        wall_area,
        wall_volume,
        blocks: CalculatorId::AeratedBlock.count(
            "blocks",
            ceil_count(with_waste(wall_area / face.value(), input.waste_percent)),
        )?,
        glue_kg,
        glue_bags: CalculatorId::AeratedBlock.count(
            "glue_bags",
            ceil_count(glue_kg / input.bag_weight),
        )?,
    })
}

pub fn definition() -> CalculatorDefinition {
    CalculatorDefinition {
        id: CalculatorId::AeratedBlock,
        category: Category::Masonry,
        title: "Aerated concrete blocks",
        description: "Aerated blocks and thin-joint adhesive for a wall",
        inputs: vec![
            FieldSpec::new("wall_length", "Wall length", "m", FieldKind::Length, 10.0),
            FieldSpec::new("wall_height", "Wall height", "m", FieldKind::Length, 2.7).max(30.0),
            FieldSpec::new("openings_area", "Doors and windows", "m²", FieldKind::Area, 0.0)
                .optional()
                .allow_zero(),
            FieldSpec::new("block_length", "Block length", "mm", FieldKind::Dimension, 600.0).max(1_000.0),
            FieldSpec::new("block_height", "Block height", "mm", FieldKind::Dimension, 200.0).max(1_000.0),
            FieldSpec::new("block_thickness", "Block thickness", "mm", FieldKind::Dimension, 300.0).max(1_000.0),
            FieldSpec::new("glue_consumption", "Adhesive per m³", "kg", FieldKind::Quantity, 25.0).max(100.0),
            FieldSpec::new("bag_weight", "Adhesive bag", "kg", FieldKind::Quantity, 25.0).max(100.0),
            FieldSpec::new("waste_percent", "Waste margin", "%", FieldKind::Percentage, 5.0),
        ],
        results: vec![
            ResultSpec::new("wall_area", "Wall area", "m²", 2),
            ResultSpec::new("wall_volume", "Masonry volume", "m³", 3),
            ResultSpec::count("blocks", "Blocks"),
            ResultSpec::new("glue_kg", "Adhesive", "kg", 1),
            ResultSpec::new("glue_bags", "Adhesive bags", "bags", 0),
        ],
        examples: vec![UsageExample::new(
            "External wall, 300 mm blocks, two windows",
            [
                ("wall_length", 12.0),
                ("wall_height", 3.0),
                ("openings_area", 4.2),
                ("block_length", 600.0),
                ("block_height", 200.0),
                ("block_thickness", 300.0),
                ("glue_consumption", 25.0),
                ("bag_weight", 25.0),
                ("waste_percent", 5.0),
            ],
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall() -> AeratedBlockInput {
        AeratedBlockInput {
            wall_length: 10.0,
            wall_height: 2.7,
            openings_area: 0.0,
            block_length: 600.0,
            block_height: 200.0,
            block_thickness: 300.0,
            glue_consumption: 25.0,
            bag_weight: 25.0,
            waste_percent: 5.0,
        }
    }

    #[test]
    fn test_blocks_and_glue() {
        let result = calculate(&wall()).unwrap();
        // 27 m² / 0.12 m² = 225, +5% = 236.25 → 237
        assert_eq!(result.blocks, 237);
        assert!((result.wall_volume - 8.1).abs() < 1e-9);
        assert!((result.glue_kg - 202.5).abs() < 1e-6);
        assert_eq!(result.glue_bags, 9);
    }

    #[test]
    fn test_exact_block_count() {
        let mut input = wall();
        input.waste_percent = 0.0;
        assert_eq!(calculate(&input).unwrap().blocks, 225);
    }

    #[test]
    fn test_openings_filling_the_wall_rejected() {
        let mut input = wall();
        input.openings_area = 30.0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.field(), Some("openings_area"));
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
