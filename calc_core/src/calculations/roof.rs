//! # Gable Roof Geometry
//!
//! Rafter length, roof surface and ridge height for a symmetric gable roof.
//!
//! ```text
//!             ridge
//!              /\
//!    rafter   /  \
//!            / α  \
//!   ________/______\________
//!   overhang   W/2   overhang
//! ```
//!
//! The overhang extends the rafter at the eaves and the roof surface at both
//! gable ends. Ridge height is measured from the top of the walls.

use serde::{Deserialize, Serialize};

use crate::calculations::{CalculatorId, Category};
use crate::definitions::{CalculatorDefinition, FieldKind, FieldSpec, ResultSpec, UsageExample};
use crate::errors::CalcResult;
use crate::validation::validate_typed;
use crate::values::Values;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoofInput {
    /// House length along the ridge (m)
    pub house_length: f64,
    /// House width across the ridge (m)
    pub house_width: f64,
    /// Roof pitch (degrees)
    pub pitch_angle: f64,
    /// Eaves and gable overhang (m)
    pub overhang: f64,
}

impl RoofInput {
    pub fn from_values(values: &Values) -> CalcResult<Self> {
        Ok(RoofInput {
            house_length: values.require("house_length")?,
            house_width: values.require("house_width")?,
            pitch_angle: values.require("pitch_angle")?,
            overhang: values.require("overhang")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoofResult {
    /// Rafter length from ridge to eaves (m)
    pub rafter_length: f64,
    /// Both slopes (m²)
    pub roof_area: f64,
    /// Ridge height above the wall plate (m)
    pub ridge_height: f64,
}

pub fn calculate(input: &RoofInput) -> CalcResult<RoofResult> {
    validate_typed(CalculatorId::Roof, input)?;

    let pitch = input.pitch_angle.to_radians();
    let half_span = input.house_width / 2.0;
    let rafter_length = (half_span + input.overhang) / pitch.cos();

    Ok(RoofResult {
        rafter_length,
        roof_area: 2.0 * rafter_length * (input.house_length + 2.0 * input.overhang),
        ridge_height: half_span * pitch.tan(),
    })
}

pub fn definition() -> CalculatorDefinition {
    CalculatorDefinition {
        id: CalculatorId::Roof,
        category: Category::Roofing,
        title: "Gable roof",
        description: "Rafter length, roof area and ridge height of a gable roof",
        inputs: vec![
            FieldSpec::new("house_length", "House length", "m", FieldKind::Length, 10.0),
            FieldSpec::new("house_width", "House width", "m", FieldKind::Length, 8.0),
            FieldSpec::new("pitch_angle", "Pitch", "°", FieldKind::Angle, 30.0),
            FieldSpec::new("overhang", "Overhang", "m", FieldKind::Length, 0.5)
                .allow_zero()
                .max(2.0),
        ],
        results: vec![
            ResultSpec::new("rafter_length", "Rafter length", "m", 2),
            ResultSpec::new("roof_area", "Roof area", "m²", 1),
            ResultSpec::new("ridge_height", "Ridge height", "m", 2),
        ],
        examples: vec![
            UsageExample::new(
                "House 10 × 8 m, 30° pitch",
                [
                    ("house_length", 10.0),
                    ("house_width", 8.0),
                    ("pitch_angle", 30.0),
                    ("overhang", 0.5),
                ],
            ),
            UsageExample::new(
                "Shed with a low 15° pitch and no overhang",
                [
                    ("house_length", 4.0),
                    ("house_width", 3.0),
                    ("pitch_angle", 15.0),
                    ("overhang", 0.0),
                ],
            ),
        ],
    }
}
