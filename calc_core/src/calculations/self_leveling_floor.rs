//! # Self-Levelling Floor Calculation
//!
//! Dry mix for a poured self-levelling compound. Unlike plaster there is no
//! waste margin: the compound flows to the walls and nothing is cut away.

use serde::{Deserialize, Serialize};

use crate::calculations::{CalculatorId, Category};
use crate::definitions::{CalculatorDefinition, FieldKind, FieldSpec, ResultSpec, UsageExample};
use crate::errors::CalcResult;
use crate::units::{ceil_count, Kilograms};
use crate::validation::validate_typed;
use crate::values::Values;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfLevelingInput {
    /// Floor area (m²)
    pub area: f64,
    /// Average pour depth (mm)
    pub layer_thickness: f64,
    /// Dry mix per m² per mm (kg)
    pub consumption: f64,
    /// Bag weight (kg)
    pub bag_weight: f64,
}

impl SelfLevelingInput {
    pub fn from_values(values: &Values) -> CalcResult<Self> {
        Ok(SelfLevelingInput {
            area: values.require("area")?,
            layer_thickness: values.require("layer_thickness")?,
            consumption: values.require("consumption")?,
            bag_weight: values.require("bag_weight")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfLevelingResult {
    /// Dry mix (kg)
    pub mass_kg: f64,
    /// Bags to buy
    pub bags: u64,
}

pub fn calculate(input: &SelfLevelingInput) -> CalcResult<SelfLevelingResult> {
    validate_typed(CalculatorId::SelfLevelingFloor, input)?;

    let mass = Kilograms(input.area * input.layer_thickness * input.consumption);
    Ok(SelfLevelingResult {
        mass_kg: mass.value(),
        bags: CalculatorId::SelfLevelingFloor.count(
            "bags",
            ceil_count(mass / Kilograms(input.bag_weight)),
        )?,
    })
}

pub fn definition() -> CalculatorDefinition {
    CalculatorDefinition {
        id: CalculatorId::SelfLevelingFloor,
        category: Category::Finishing,
        title: "Self-levelling floor",
        description: "Bags of self-levelling compound for a poured floor",
        inputs: vec![
            FieldSpec::new("area", "Floor area", "m²", FieldKind::Area, 20.0),
            FieldSpec::new("layer_thickness", "Layer thickness", "mm", FieldKind::Dimension, 10.0).max(100.0),
            FieldSpec::new("consumption", "Consumption per mm", "kg/m²", FieldKind::Quantity, 1.6).max(5.0),
            FieldSpec::new("bag_weight", "Bag weight", "kg", FieldKind::Quantity, 25.0).max(100.0),
        ],
        results: vec![
            ResultSpec::new("mass_kg", "Dry mix", "kg", 1),
            ResultSpec::new("bags", "Bags", "bags", 0),
        ],
        examples: vec![UsageExample::new(
            "Kitchen floor, 10 mm pour",
            [
                ("area", 12.0),
                ("layer_thickness", 10.0),
                ("consumption", 1.6),
                ("bag_weight", 25.0),
            ],
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pour() {
        let input = SelfLevelingInput {
            area: 20.0,
            layer_thickness: 10.0,
            consumption: 1.6,
            bag_weight: 25.0,
        };
        let result = calculate(&input).unwrap();
        assert!((result.mass_kg - 320.0).abs() < 1e-9);
        assert_eq!(result.bags, 13);
    }

    #[test]
    fn test_exact_bags() {
        let input = SelfLevelingInput {
            area: 25.0,
            layer_thickness: 5.0,
            consumption: 1.6,
            bag_weight: 25.0,
        };
        assert_eq!(calculate(&input).unwrap().bags, 8);
    }
}
