//! # Concrete Slab Calculation
//!
//! Ready-mix volume for a rectangular slab and, for site mixing, the cement,
//! sand, gravel and water that go into it.
//!
//! ## Mix Proportions (per m³ of concrete)
//!
//! | Component | Quantity |
//! |-----------|----------|
//! | Cement    | user input, 280 kg for a general-purpose mix |
//! | Sand      | 0.5 m³ |
//! | Gravel    | 0.8 m³ |
//! | Water     | 180 l |

use serde::{Deserialize, Serialize};

use crate::calculations::{CalculatorId, Category};
use crate::definitions::{CalculatorDefinition, FieldKind, FieldSpec, ResultSpec, UsageExample};
use crate::errors::CalcResult;
use crate::units::{ceil_count, with_waste, Kilograms, Meters, Millimeters};
use crate::validation::validate_typed;
use crate::values::Values;

/// Sand per m³ of concrete (m³)
pub const SAND_M3_PER_M3: f64 = 0.5;
/// Gravel per m³ of concrete (m³)
pub const GRAVEL_M3_PER_M3: f64 = 0.8;
/// Water per m³ of concrete (l)
pub const WATER_L_PER_M3: f64 = 180.0;

/// Input parameters for a concrete slab.
///
/// ## JSON Example
///
/// ```json
/// {
///   "length": 6.0,
///   "width": 4.0,
///   "thickness": 200.0,
///   "cement_per_m3": 280.0,
///   "bag_weight": 50.0,
///   "waste_percent": 5.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcreteInput {
    /// Slab length (m)
    pub length: f64,
    /// Slab width (m)
    pub width: f64,
    /// Slab thickness (mm)
    pub thickness: f64,
    /// Cement content (kg per m³)
    pub cement_per_m3: f64,
    /// Cement bag weight (kg)
    pub bag_weight: f64,
    /// Spillage and over-excavation margin (%)
    pub waste_percent: f64,
}

impl ConcreteInput {
    pub fn from_values(values: &Values) -> CalcResult<Self> {
        Ok(ConcreteInput {
            length: values.require("length")?,
            width: values.require("width")?,
            thickness: values.require("thickness")?,
            cement_per_m3: values.require("cement_per_m3")?,
            bag_weight: values.require("bag_weight")?,
            waste_percent: values.require("waste_percent")?,
        })
    }
}

/// Concrete estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcreteResult {
    /// Concrete to order, including waste (m³)
    pub volume: f64,
    /// Cement (kg)
    pub cement_kg: f64,
    /// Cement bags
    pub cement_bags: u64,
    /// Sand (m³)
    pub sand_m3: f64,
    /// Gravel (m³)
    pub gravel_m3: f64,
    /// Mixing water (l)
    pub water_liters: f64,
}

/// Calculate slab volume and site-mix materials.
pub fn calculate(input: &ConcreteInput) -> CalcResult<ConcreteResult> {
    validate_typed(CalculatorId::Concrete, input)?;

    let thickness: Meters = Millimeters(input.thickness).into();
    let net = Meters(input.length) * Meters(input.width) * thickness;
    let volume = with_waste(net.value(), input.waste_percent);
    let cement = Kilograms(volume * input.cement_per_m3);

    Ok(ConcreteResult {
        volume,
        cement_kg: cement.value(),
        cement_bags: CalculatorId::Concrete.count(
            "cement_bags",
            ceil_count(cement / Kilograms(input.bag_weight)),
        )?,
        sand_m3: volume * SAND_M3_PER_M3,
        gravel_m3: volume * GRAVEL_M3_PER_M3,
        water_liters: volume * WATER_L_PER_M3,
    })
}

pub fn definition() -> CalculatorDefinition {
    CalculatorDefinition {
        id: CalculatorId::Concrete,
        category: Category::Concrete,
        title: "Concrete slab",
        description: "Concrete volume, cement bags, sand, gravel and water for a slab",
        inputs: vec![
            FieldSpec::new("length", "Slab length", "m", FieldKind::Length, 6.0),
            FieldSpec::new("width", "Slab width", "m", FieldKind::Length, 4.0),
            FieldSpec::new("thickness", "Thickness", "mm", FieldKind::Dimension, 200.0).max(2_000.0),
            FieldSpec::new("cement_per_m3", "Cement per m³", "kg", FieldKind::Quantity, 280.0).max(1_000.0),
            FieldSpec::new("bag_weight", "Cement bag", "kg", FieldKind::Quantity, 50.0).max(100.0),
            FieldSpec::new("waste_percent", "Waste margin", "%", FieldKind::Percentage, 5.0),
        ],
        results: vec![
            ResultSpec::new("volume", "Concrete", "m³", 2),
            ResultSpec::new("cement_kg", "Cement", "kg", 0),
            ResultSpec::new("cement_bags", "Cement bags", "bags", 0),
            ResultSpec::new("sand_m3", "Sand", "m³", 2),
            ResultSpec::new("gravel_m3", "Gravel", "m³", 2),
            ResultSpec::new("water_liters", "Water", "l", 0),
        ],
        examples: vec![
            UsageExample::new(
                "Garage floor slab 6 × 4 m",
                [
                    ("length", 6.0),
                    ("width", 4.0),
                    ("thickness", 200.0),
                    ("cement_per_m3", 280.0),
                    ("bag_weight", 50.0),
                    ("waste_percent", 5.0),
                ],
            ),
            UsageExample::new(
                "Garden path, 100 mm",
                [
                    ("length", 15.0),
                    ("width", 1.0),
                    ("thickness", 100.0),
                    ("cement_per_m3", 320.0),
                    ("bag_weight", 25.0),
                    ("waste_percent", 10.0),
                ],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garage_slab() {
        let input = ConcreteInput {
            length: 6.0,
            width: 4.0,
            thickness: 200.0,
            cement_per_m3: 280.0,
            bag_weight: 50.0,
            waste_percent: 5.0,
        };
        let result = calculate(&input).unwrap();
        // 6 × 4 × 0.2 = 4.8 m³, +5% = 5.04 m³
        assert!((result.volume - 5.04).abs() < 1e-9);
        assert!((result.cement_kg - 1411.2).abs() < 1e-6);
        assert_eq!(result.cement_bags, 29);
        assert!((result.sand_m3 - 2.52).abs() < 1e-9);
        assert!((result.gravel_m3 - 4.032).abs() < 1e-9);
        assert!((result.water_liters - 907.2).abs() < 1e-6);
    }

    #[test]
    fn test_thickness_limit() {
        let input = ConcreteInput {
            length: 6.0,
            width: 4.0,
            thickness: 2_500.0,
            cement_per_m3: 280.0,
            bag_weight: 50.0,
            waste_percent: 5.0,
        };
        assert_eq!(calculate(&input).unwrap_err().field(), Some("thickness"));
    }
}
