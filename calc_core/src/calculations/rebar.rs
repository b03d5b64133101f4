//! # Slab Reinforcement Calculation
//!
//! Bars, total length, steel weight and tie points for a square rebar mesh.
//!
//! Bars run in both directions at the same spacing, with one extra bar so
//! both edges are covered. Lap splices are allowed for with a percentage on
//! the total length. Steel weight uses a density of 7850 kg/m³.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::calculations::{CalculatorId, Category};
use crate::definitions::{CalculatorDefinition, FieldKind, FieldSpec, ResultSpec, UsageExample};
use crate::errors::CalcResult;
use crate::units::{floor_count, with_waste, Meters, Millimeters};
use crate::validation::validate_typed;
use crate::values::Values;

/// Density of reinforcing steel (kg/m³)
pub const STEEL_DENSITY: f64 = 7850.0;

/// Mass of one metre of bar (kg/m) for a diameter in mm.
///
/// ```rust
/// use calc_core::calculations::rebar::weight_per_meter;
/// assert!((weight_per_meter(12.0) - 0.888).abs() < 0.001);
/// ```
pub fn weight_per_meter(diameter_mm: f64) -> f64 {
    let d: Meters = Millimeters(diameter_mm).into();
    PI * d.value() * d.value() / 4.0 * STEEL_DENSITY
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebarInput {
    /// Slab length (m)
    pub slab_length: f64,
    /// Slab width (m)
    pub slab_width: f64,
    /// Bar spacing, both directions (mm)
    pub spacing: f64,
    /// Bar diameter (mm)
    pub bar_diameter: f64,
    /// Mesh layers (top and bottom = 2)
    pub layers: f64,
    /// Lap splice allowance (%)
    pub overlap_percent: f64,
}

impl RebarInput {
    pub fn from_values(values: &Values) -> CalcResult<Self> {
        Ok(RebarInput {
            slab_length: values.require("slab_length")?,
            slab_width: values.require("slab_width")?,
            spacing: values.require("spacing")?,
            bar_diameter: values.require("bar_diameter")?,
            layers: f64::from(values.count("layers")?),
            overlap_percent: values.require("overlap_percent")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebarResult {
    /// Bars in all layers
    pub bars: u64,
    /// Bar length including laps (m)
    pub total_length: f64,
    /// Mass of one metre of bar (kg/m)
    pub weight_per_meter: f64,
    /// Steel mass (kg)
    pub weight_kg: f64,
    /// Bar crossings to tie
    pub ties: u64,
}

pub fn calculate(input: &RebarInput) -> CalcResult<RebarResult> {
    validate_typed(CalculatorId::Rebar, input)?;

    let spacing: Meters = Millimeters(input.spacing).into();
    let layers = input.layers as u64;

    // Bars parallel to the length are spread across the width, and vice versa
    let longitudinal = CalculatorId::Rebar.count("bars", floor_count(input.slab_width / spacing.value()))? + 1;
    let transverse = CalculatorId::Rebar.count("bars", floor_count(input.slab_length / spacing.value()))? + 1;

    let per_layer = longitudinal as f64 * input.slab_length + transverse as f64 * input.slab_width;
    let total_length = with_waste(per_layer * input.layers, input.overlap_percent);
    let unit_weight = weight_per_meter(input.bar_diameter);

    Ok(RebarResult {
        bars: layers * (longitudinal + transverse),
        total_length,
        weight_per_meter: unit_weight,
        weight_kg: total_length * unit_weight,
        ties: layers * longitudinal * transverse,
    })
}

pub fn definition() -> CalculatorDefinition {
    CalculatorDefinition {
        id: CalculatorId::Rebar,
        category: Category::Concrete,
        title: "Rebar mesh",
        description: "Reinforcement bars, steel weight and ties for a slab",
        inputs: vec![
            FieldSpec::new("slab_length", "Slab length", "m", FieldKind::Length, 6.0),
            FieldSpec::new("slab_width", "Slab width", "m", FieldKind::Length, 4.0),
            FieldSpec::new("spacing", "Bar spacing", "mm", FieldKind::Dimension, 200.0)
                .min(50.0)
                .max(1_000.0),
            FieldSpec::new("bar_diameter", "Bar diameter", "mm", FieldKind::Dimension, 12.0).max(40.0),
            FieldSpec::new("layers", "Layers", "", FieldKind::Count, 2.0).max(4.0),
            FieldSpec::new("overlap_percent", "Lap allowance", "%", FieldKind::Percentage, 10.0),
        ],
        results: vec![
            ResultSpec::count("bars", "Bars"),
            ResultSpec::new("total_length", "Total length", "m", 1),
            ResultSpec::new("weight_per_meter", "Weight per metre", "kg/m", 3),
            ResultSpec::new("weight_kg", "Steel weight", "kg", 1),
            ResultSpec::count("ties", "Tie points"),
        ],
        examples: vec![
            UsageExample::new(
                "Garage slab, two layers of 12 mm at 200",
                [
                    ("slab_length", 6.0),
                    ("slab_width", 4.0),
                    ("spacing", 200.0),
                    ("bar_diameter", 12.0),
                    ("layers", 2.0),
                    ("overlap_percent", 10.0),
                ],
            ),
            UsageExample::new(
                "Patio, single layer of 8 mm at 150",
                [
                    ("slab_length", 4.0),
                    ("slab_width", 3.0),
                    ("spacing", 150.0),
                    ("bar_diameter", 8.0),
                    ("layers", 1.0),
                    ("overlap_percent", 5.0),
                ],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_layer_mesh() {
        let input = RebarInput {
            slab_length: 6.0,
            slab_width: 4.0,
            spacing: 200.0,
            bar_diameter: 12.0,
            layers: 2.0,
            overlap_percent: 10.0,
        };
        let result = calculate(&input).unwrap();
        // 21 bars × 6 m + 31 bars × 4 m = 250 m per layer, × 2 × 1.1 = 550 m
        assert_eq!(result.bars, 104);
        assert!((result.total_length - 550.0).abs() < 1e-9);
        assert!((result.weight_per_meter - 0.8878).abs() < 1e-4);
        assert!((result.weight_kg - 488.30).abs() < 0.01);
        assert_eq!(result.ties, 2 * 21 * 31);
    }

    #[test]
    fn test_standard_bar_weights() {
        // Tabulated masses for common diameters
        assert!((weight_per_meter(8.0) - 0.395).abs() < 0.001);
        assert!((weight_per_meter(10.0) - 0.617).abs() < 0.001);
        assert!((weight_per_meter(16.0) - 1.578).abs() < 0.001);
    }

    #[test]
    fn test_spacing_floor() {
        let input = RebarInput {
            slab_length: 6.0,
            slab_width: 4.0,
            spacing: 20.0,
            bar_diameter: 12.0,
            layers: 1.0,
            overlap_percent: 0.0,
        };
        assert_eq!(calculate(&input).unwrap_err().field(), Some("spacing"));
    }
}
