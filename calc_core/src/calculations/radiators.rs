//! Radiator sections for a room, sized by heated volume.

use serde::{Deserialize, Serialize};

use crate::calculations::{CalculatorId, Category};
use crate::definitions::{CalculatorDefinition, FieldKind, FieldSpec, ResultSpec, UsageExample};
use crate::errors::CalcResult;
use crate::units::{ceil_count, with_waste};
use crate::validation::validate_typed;
use crate::values::Values;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadiatorsInput {
    /// Floor area (m²)
    pub room_area: f64,
    /// Ceiling height (m)
    pub ceiling_height: f64,
    /// Heat demand per m³ of room (W), 41 for a typical panel building
    pub heat_per_m3: f64,
    /// Output of one radiator section (W)
    pub section_power: f64,
    /// Reserve for cold spells (%)
    pub reserve_percent: f64,
}

impl RadiatorsInput {
    pub fn from_values(values: &Values) -> CalcResult<Self> {
        Ok(RadiatorsInput {
            room_area: values.require("room_area")?,
            ceiling_height: values.require("ceiling_height")?,
            heat_per_m3: values.require("heat_per_m3")?,
            section_power: values.require("section_power")?,
            reserve_percent: values.require("reserve_percent")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadiatorsResult {
    /// Heat output required (W)
    pub heat_demand: f64,
    /// Radiator sections
    pub sections: u64,
}

pub fn calculate(input: &RadiatorsInput) -> CalcResult<RadiatorsResult> {
    validate_typed(CalculatorId::Radiators, input)?;

    let volume = input.room_area * input.ceiling_height;
    let heat_demand = with_waste(volume * input.heat_per_m3, input.reserve_percent);

    Ok(RadiatorsResult {
        heat_demand,
        sections: CalculatorId::Radiators.count(
            "sections",
            ceil_count(heat_demand / input.section_power),
        )?,
    })
}

pub fn definition() -> CalculatorDefinition {
    CalculatorDefinition {
        id: CalculatorId::Radiators,
        category: Category::Plumbing,
        title: "Radiators",
        description: "Heat demand of a room and number of radiator sections",
        inputs: vec![
            FieldSpec::new("room_area", "Room area", "m²", FieldKind::Area, 20.0),
            FieldSpec::new("ceiling_height", "Ceiling height", "m", FieldKind::Length, 2.7).max(10.0),
            FieldSpec::new("heat_per_m3", "Heat per m³", "W", FieldKind::Quantity, 41.0).max(500.0),
            FieldSpec::new("section_power", "Section output", "W", FieldKind::Quantity, 180.0).max(5_000.0),
            FieldSpec::new("reserve_percent", "Reserve", "%", FieldKind::Percentage, 10.0),
        ],
        results: vec![
            ResultSpec::new("heat_demand", "Heat demand", "W", 0),
            ResultSpec::new("sections", "Sections", "pcs", 0),
        ],
        examples: vec![
            UsageExample::new(
                "Living room 20 m²",
                [
                    ("room_area", 20.0),
                    ("ceiling_height", 2.7),
                    ("heat_per_m3", 41.0),
                    ("section_power", 180.0),
                    ("reserve_percent", 10.0),
                ],
            ),
            UsageExample::new(
                "Well-insulated bedroom",
                [
                    ("room_area", 12.0),
                    ("ceiling_height", 2.5),
                    ("heat_per_m3", 34.0),
                    ("section_power", 160.0),
                    ("reserve_percent", 0.0),
                ],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_living_room() {
        let input = RadiatorsInput {
            room_area: 20.0,
            ceiling_height: 2.7,
            heat_per_m3: 41.0,
            section_power: 180.0,
            reserve_percent: 10.0,
        };
        let result = calculate(&input).unwrap();
        // 54 m³ × 41 W = 2214 W, +10% = 2435.4 W / 180 = 13.5 → 14
        assert!((result.heat_demand - 2435.4).abs() < 1e-6);
        assert_eq!(result.sections, 14);
    }
}
