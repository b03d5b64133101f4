//! # Strip Foundation Calculation
//!
//! Concrete and formwork for a strip footing under the outer walls of a
//! rectangular building, optionally with internal load-bearing walls.

use serde::{Deserialize, Serialize};

use crate::calculations::{CalculatorId, Category};
use crate::definitions::{CalculatorDefinition, FieldKind, FieldSpec, ResultSpec, UsageExample};
use crate::errors::CalcResult;
use crate::units::{with_waste, Meters, Millimeters};
use crate::validation::validate_typed;
use crate::values::Values;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripFoundationInput {
    /// Outer length of the building (m)
    pub outer_length: f64,
    /// Outer width of the building (m)
    pub outer_width: f64,
    /// Combined length of internal strips (m)
    pub inner_walls_length: f64,
    /// Strip width (mm)
    pub strip_width: f64,
    /// Strip depth (mm)
    pub strip_depth: f64,
    /// Waste margin (%)
    pub waste_percent: f64,
}

impl StripFoundationInput {
    pub fn from_values(values: &Values) -> CalcResult<Self> {
        Ok(StripFoundationInput {
            outer_length: values.require("outer_length")?,
            outer_width: values.require("outer_width")?,
            inner_walls_length: values.require("inner_walls_length")?,
            strip_width: values.require("strip_width")?,
            strip_depth: values.require("strip_depth")?,
            waste_percent: values.require("waste_percent")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripFoundationResult {
    /// Strip length along outer and inner walls (m)
    pub total_length: f64,
    /// Concrete including waste (m³)
    pub concrete_volume: f64,
    /// Formwork boards for both faces (m²)
    pub formwork_area: f64,
}

pub fn calculate(input: &StripFoundationInput) -> CalcResult<StripFoundationResult> {
    validate_typed(CalculatorId::StripFoundation, input)?;

    let total_length = 2.0 * (input.outer_length + input.outer_width) + input.inner_walls_length;
    let width: Meters = Millimeters(input.strip_width).into();
    let depth: Meters = Millimeters(input.strip_depth).into();
    let cross_section = width * depth;

    Ok(StripFoundationResult {
        total_length,
        concrete_volume: with_waste(cross_section.value() * total_length, input.waste_percent),
        formwork_area: 2.0 * total_length * depth.value(),
    })
}

pub fn definition() -> CalculatorDefinition {
    CalculatorDefinition {
        id: CalculatorId::StripFoundation,
        category: Category::Concrete,
        title: "Strip foundation",
        description: "Concrete volume and formwork for a strip footing",
        inputs: vec![
            FieldSpec::new("outer_length", "Building length", "m", FieldKind::Length, 10.0),
            FieldSpec::new("outer_width", "Building width", "m", FieldKind::Length, 8.0),
            FieldSpec::new("inner_walls_length", "Internal walls", "m", FieldKind::Length, 0.0)
                .optional()
                .allow_zero(),
            FieldSpec::new("strip_width", "Strip width", "mm", FieldKind::Dimension, 400.0).max(3_000.0),
            FieldSpec::new("strip_depth", "Strip depth", "mm", FieldKind::Dimension, 1_000.0).max(5_000.0),
            FieldSpec::new("waste_percent", "Waste margin", "%", FieldKind::Percentage, 5.0),
        ],
        results: vec![
            ResultSpec::new("total_length", "Strip length", "m", 2),
            ResultSpec::new("concrete_volume", "Concrete", "m³", 2),
            ResultSpec::new("formwork_area", "Formwork", "m²", 1),
        ],
        examples: vec![
            UsageExample::new(
                "House 10 × 8 m",
                [
                    ("outer_length", 10.0),
                    ("outer_width", 8.0),
                    ("strip_width", 400.0),
                    ("strip_depth", 1_000.0),
                    ("waste_percent", 5.0),
                ],
            ),
            UsageExample::new(
                "Shallow footing with an internal wall",
                [
                    ("outer_length", 9.0),
                    ("outer_width", 6.0),
                    ("inner_walls_length", 6.0),
                    ("strip_width", 300.0),
                    ("strip_depth", 600.0),
                    ("waste_percent", 7.0),
                ],
            ),
        ],
    }
}
