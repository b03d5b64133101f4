//! # Floor Screed Calculation
//!
//! Cement and sand for a cement-sand screed. The dry mix is 1.3 times the
//! wet volume to account for shrinkage on mixing, and cement is taken at a
//! bulk density of 1300 kg/m³.

use serde::{Deserialize, Serialize};

use crate::calculations::{CalculatorId, Category};
use crate::definitions::{CalculatorDefinition, FieldKind, FieldSpec, ResultSpec, UsageExample};
use crate::errors::CalcResult;
use crate::units::{ceil_count, Kilograms, Meters, Millimeters};
use crate::validation::validate_typed;
use crate::values::Values;

/// Dry to wet volume ratio of a cement-sand mix
pub const DRY_VOLUME_FACTOR: f64 = 1.3;
/// Bulk density of cement (kg/m³)
pub const CEMENT_BULK_DENSITY: f64 = 1300.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreedInput {
    /// Floor area (m²)
    pub area: f64,
    /// Screed thickness (mm)
    pub thickness: f64,
    /// Parts of sand per part of cement
    pub sand_ratio: f64,
    /// Cement bag weight (kg)
    pub bag_weight: f64,
}

impl ScreedInput {
    pub fn from_values(values: &Values) -> CalcResult<Self> {
        Ok(ScreedInput {
            area: values.require("area")?,
            thickness: values.require("thickness")?,
            sand_ratio: values.require("sand_ratio")?,
            bag_weight: values.require("bag_weight")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreedResult {
    /// Wet screed volume (m³)
    pub mortar_volume: f64,
    /// Cement (kg)
    pub cement_kg: f64,
    /// Cement bags
    pub cement_bags: u64,
    /// Sand (m³)
    pub sand_m3: f64,
}

pub fn calculate(input: &ScreedInput) -> CalcResult<ScreedResult> {
    validate_typed(CalculatorId::Screed, input)?;

    let thickness: Meters = Millimeters(input.thickness).into();
    let wet = input.area * thickness.value();
    let cement_volume = wet * DRY_VOLUME_FACTOR / (1.0 + input.sand_ratio);
    let cement = Kilograms(cement_volume * CEMENT_BULK_DENSITY);

    Ok(ScreedResult {
        mortar_volume: wet,
        cement_kg: cement.value(),
        cement_bags: CalculatorId::Screed.count(
            "cement_bags",
            ceil_count(cement / Kilograms(input.bag_weight)),
        )?,
        sand_m3: cement_volume * input.sand_ratio,
    })
}

pub fn definition() -> CalculatorDefinition {
    CalculatorDefinition {
        id: CalculatorId::Screed,
        category: Category::Concrete,
        title: "Floor screed",
        description: "Cement bags and sand for a cement-sand floor screed",
        inputs: vec![
            FieldSpec::new("area", "Floor area", "m²", FieldKind::Area, 20.0),
            FieldSpec::new("thickness", "Thickness", "mm", FieldKind::Dimension, 50.0).max(200.0),
            FieldSpec::new("sand_ratio", "Sand per cement", "parts", FieldKind::Quantity, 3.0).max(10.0),
            FieldSpec::new("bag_weight", "Cement bag", "kg", FieldKind::Quantity, 50.0).max(100.0),
        ],
        results: vec![
            ResultSpec::new("mortar_volume", "Screed volume", "m³", 2),
            ResultSpec::new("cement_kg", "Cement", "kg", 0),
            ResultSpec::new("cement_bags", "Cement bags", "bags", 0),
            ResultSpec::new("sand_m3", "Sand", "m³", 2),
        ],
        examples: vec![
            UsageExample::new(
                "Room 20 m², 50 mm, 1:3 mix",
                [
                    ("area", 20.0),
                    ("thickness", 50.0),
                    ("sand_ratio", 3.0),
                    ("bag_weight", 50.0),
                ],
            ),
            UsageExample::new(
                "Bathroom fall screed, 1:4 mix",
                [
                    ("area", 5.5),
                    ("thickness", 40.0),
                    ("sand_ratio", 4.0),
                    ("bag_weight", 25.0),
                ],
            ),
        ],
    }
}
