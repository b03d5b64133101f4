//! # Plaster Calculation
//!
//! Dry plaster mix for walls: mass is surface × layer thickness × consumption
//! per millimetre, plus waste. Gypsum plasters run about 0.9 kg/m² per mm,
//! cement-sand plasters about 1.7.

use serde::{Deserialize, Serialize};

use crate::calculations::{CalculatorId, Category};
use crate::definitions::{CalculatorDefinition, FieldKind, FieldSpec, ResultSpec, UsageExample};
use crate::errors::CalcResult;
use crate::units::{ceil_count, with_waste, Kilograms};
use crate::validation::validate_typed;
use crate::values::Values;

/// Input parameters for a plaster estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlasterInput {
    /// Surface to plaster (m²)
    pub area: f64,
    /// Average layer thickness (mm)
    pub layer_thickness: f64,
    /// Dry mix per m² per mm of layer (kg)
    pub consumption: f64,
    /// Bag weight (kg)
    pub bag_weight: f64,
    /// Waste margin (%)
    pub waste_percent: f64,
}

impl PlasterInput {
    pub fn from_values(values: &Values) -> CalcResult<Self> {
        Ok(PlasterInput {
            area: values.require("area")?,
            layer_thickness: values.require("layer_thickness")?,
            consumption: values.require("consumption")?,
            bag_weight: values.require("bag_weight")?,
            waste_percent: values.require("waste_percent")?,
        })
    }
}

/// Plaster estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlasterResult {
    /// Dry mix including waste (kg)
    pub mass_kg: f64,
    /// Bags to buy
    pub bags: u64,
}

pub fn calculate(input: &PlasterInput) -> CalcResult<PlasterResult> {
    validate_typed(CalculatorId::Plaster, input)?;

    let mass = Kilograms(with_waste(
        input.area * input.layer_thickness * input.consumption,
        input.waste_percent,
    ));

    Ok(PlasterResult {
        mass_kg: mass.value(),
        bags: CalculatorId::Plaster.count("bags", ceil_count(mass / Kilograms(input.bag_weight)))?,
    })
}

pub fn definition() -> CalculatorDefinition {
    CalculatorDefinition {
        id: CalculatorId::Plaster,
        category: Category::Finishing,
        title: "Plaster",
        description: "Bags of gypsum or cement plaster for levelling walls",
        inputs: vec![
            FieldSpec::new("area", "Wall area", "m²", FieldKind::Area, 30.0),
            FieldSpec::new("layer_thickness", "Layer thickness", "mm", FieldKind::Dimension, 10.0).max(100.0),
            FieldSpec::new("consumption", "Consumption per mm", "kg/m²", FieldKind::Quantity, 0.9).max(5.0),
            FieldSpec::new("bag_weight", "Bag weight", "kg", FieldKind::Quantity, 30.0).max(100.0),
            FieldSpec::new("waste_percent", "Waste margin", "%", FieldKind::Percentage, 5.0),
        ],
        results: vec![
            ResultSpec::new("mass_kg", "Dry mix", "kg", 1),
            ResultSpec::new("bags", "Bags", "bags", 0),
        ],
        examples: vec![
            UsageExample::new(
                "Gypsum plaster, 10 mm over 30 m²",
                [
                    ("area", 30.0),
                    ("layer_thickness", 10.0),
                    ("consumption", 0.9),
                    ("bag_weight", 30.0),
                    ("waste_percent", 5.0),
                ],
            ),
            UsageExample::new(
                "Cement plaster on a garage wall",
                [
                    ("area", 45.0),
                    ("layer_thickness", 20.0),
                    ("consumption", 1.7),
                    ("bag_weight", 25.0),
                    ("waste_percent", 10.0),
                ],
            ),
        ],
    }
}
