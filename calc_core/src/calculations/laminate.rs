//! # Laminate Flooring Calculation
//!
//! Planks and packs of laminate for a rectangular room, plus the skirting
//! board length along the perimeter.

use serde::{Deserialize, Serialize};

use crate::calculations::{CalculatorId, Category};
use crate::definitions::{CalculatorDefinition, FieldKind, FieldSpec, ResultSpec, UsageExample};
use crate::errors::CalcResult;
use crate::units::{ceil_count, with_waste, Meters, Millimeters};
use crate::validation::validate_typed;
use crate::values::Values;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaminateInput {
    /// Room length (m)
    pub room_length: f64,
    /// Room width (m)
    pub room_width: f64,
    /// Plank length (mm)
    pub plank_length: f64,
    /// Plank width (mm)
    pub plank_width: f64,
    /// Planks in one pack
    pub planks_per_pack: f64,
    /// Waste margin for cuts (%)
    pub waste_percent: f64,
}

impl LaminateInput {
    pub fn from_values(values: &Values) -> CalcResult<Self> {
        Ok(LaminateInput {
            room_length: values.require("room_length")?,
            room_width: values.require("room_width")?,
            plank_length: values.require("plank_length")?,
            plank_width: values.require("plank_width")?,
            planks_per_pack: f64::from(values.count("planks_per_pack")?),
            waste_percent: values.require("waste_percent")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaminateResult {
    /// Floor area (m²)
    pub floor_area: f64,
    /// Planks to lay
    pub planks: u64,
    /// Packs to buy
    pub packs: u64,
    /// Skirting board along the walls (m)
    pub skirting_length: f64,
}

pub fn calculate(input: &LaminateInput) -> CalcResult<LaminateResult> {
    validate_typed(CalculatorId::Laminate, input)?;

    let floor_area = Meters(input.room_length) * Meters(input.room_width);
    let plank_length: Meters = Millimeters(input.plank_length).into();
    let plank_width: Meters = Millimeters(input.plank_width).into();
    let plank_area = plank_length * plank_width;

    let planks = CalculatorId::Laminate.count(
        "planks",
        ceil_count(with_waste(floor_area.value() / plank_area.value(), input.waste_percent)),
    )?;

    Ok(LaminateResult {
        floor_area: floor_area.value(),
        planks,
        packs: CalculatorId::Laminate.count(
            "packs",
            ceil_count(planks as f64 / input.planks_per_pack),
        )?,
        skirting_length: 2.0 * (input.room_length + input.room_width),
    })
}

pub fn definition() -> CalculatorDefinition {
    CalculatorDefinition {
        id: CalculatorId::Laminate,
        category: Category::Finishing,
        title: "Laminate flooring",
        description: "Laminate planks, packs and skirting for a rectangular room",
        inputs: vec![
            FieldSpec::new("room_length", "Room length", "m", FieldKind::Length, 5.0),
            FieldSpec::new("room_width", "Room width", "m", FieldKind::Length, 4.0),
            FieldSpec::new("plank_length", "Plank length", "mm", FieldKind::Dimension, 1380.0).max(3_000.0),
            FieldSpec::new("plank_width", "Plank width", "mm", FieldKind::Dimension, 193.0).max(1_000.0),
            FieldSpec::new("planks_per_pack", "Planks per pack", "pcs", FieldKind::Count, 8.0).max(100.0),
            FieldSpec::new("waste_percent", "Waste margin", "%", FieldKind::Percentage, 7.0),
        ],
        results: vec![
            ResultSpec::new("floor_area", "Floor area", "m²", 2),
            ResultSpec::count("planks", "Planks"),
            ResultSpec::new("packs", "Packs", "packs", 0),
            ResultSpec::new("skirting_length", "Skirting", "m", 2),
        ],
        examples: vec![
            UsageExample::new(
                "Bedroom 5 × 4 m, straight lay",
                [
                    ("room_length", 5.0),
                    ("room_width", 4.0),
                    ("plank_length", 1380.0),
                    ("plank_width", 193.0),
                    ("planks_per_pack", 8.0),
                    ("waste_percent", 7.0),
                ],
            ),
            UsageExample::new(
                "Hallway laid diagonally",
                [
                    ("room_length", 6.0),
                    ("room_width", 1.6),
                    ("plank_length", 1285.0),
                    ("plank_width", 192.0),
                    ("planks_per_pack", 9.0),
                    ("waste_percent", 15.0),
                ],
            ),
        ],
    }
}
