//! # Lighting Calculation (lumen method)
//!
//! ```text
//! total flux = E × A / (UF × MF)
//! lamps      = ⌈total flux / lamp flux⌉
//! ```
//!
//! `UF` is the utilisation factor of the room and luminaire, `MF` the
//! maintenance factor for lamp ageing and dirt.

use serde::{Deserialize, Serialize};

use crate::calculations::{CalculatorId, Category};
use crate::definitions::{CalculatorDefinition, FieldKind, FieldSpec, ResultSpec, UsageExample};
use crate::errors::CalcResult;
use crate::units::{ceil_count, Meters};
use crate::validation::validate_typed;
use crate::values::Values;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightingInput {
    /// Room length (m)
    pub room_length: f64,
    /// Room width (m)
    pub room_width: f64,
    /// Target illuminance (lx)
    pub illuminance: f64,
    /// Luminous flux of one lamp (lm)
    pub lamp_flux: f64,
    pub utilization_factor: f64,
    pub maintenance_factor: f64,
}

impl LightingInput {
    pub fn from_values(values: &Values) -> CalcResult<Self> {
        Ok(LightingInput {
            room_length: values.require("room_length")?,
            room_width: values.require("room_width")?,
            illuminance: values.require("illuminance")?,
            lamp_flux: values.require("lamp_flux")?,
            utilization_factor: values.require("utilization_factor")?,
            maintenance_factor: values.require("maintenance_factor")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightingResult {
    /// Floor area (m²)
    pub area: f64,
    /// Installed flux required (lm)
    pub total_flux: f64,
    /// Lamps to install
    pub lamps: u64,
}

pub fn calculate(input: &LightingInput) -> CalcResult<LightingResult> {
    validate_typed(CalculatorId::Lighting, input)?;

    let area = (Meters(input.room_length) * Meters(input.room_width)).value();
    let total_flux =
        input.illuminance * area / (input.utilization_factor * input.maintenance_factor);

    Ok(LightingResult {
        area,
        total_flux,
        lamps: CalculatorId::Lighting.count("lamps", ceil_count(total_flux / input.lamp_flux))?,
    })
}

pub fn definition() -> CalculatorDefinition {
    CalculatorDefinition {
        id: CalculatorId::Lighting,
        category: Category::Electrical,
        title: "Lighting",
        description: "Number of lamps for a target illuminance by the lumen method",
        inputs: vec![
            FieldSpec::new("room_length", "Room length", "m", FieldKind::Length, 5.0),
            FieldSpec::new("room_width", "Room width", "m", FieldKind::Length, 4.0),
            FieldSpec::new("illuminance", "Illuminance", "lx", FieldKind::Quantity, 300.0).max(5_000.0),
            FieldSpec::new("lamp_flux", "Lamp flux", "lm", FieldKind::Quantity, 1_500.0).max(200_000.0),
            FieldSpec::new("utilization_factor", "Utilisation factor", "", FieldKind::Quantity, 0.5).max(1.0),
            FieldSpec::new("maintenance_factor", "Maintenance factor", "", FieldKind::Quantity, 0.8).max(1.0),
        ],
        results: vec![
            ResultSpec::new("area", "Floor area", "m²", 2),
            ResultSpec::new("total_flux", "Total flux", "lm", 0),
            ResultSpec::new("lamps", "Lamps", "pcs", 0),
        ],
        examples: vec![
            UsageExample::new(
                "Office 5 × 4 m at 300 lx",
                [
                    ("room_length", 5.0),
                    ("room_width", 4.0),
                    ("illuminance", 300.0),
                    ("lamp_flux", 1_500.0),
                    ("utilization_factor", 0.5),
                    ("maintenance_factor", 0.8),
                ],
            ),
            UsageExample::new(
                "Living room at 150 lx with 806 lm bulbs",
                [
                    ("room_length", 6.0),
                    ("room_width", 4.5),
                    ("illuminance", 150.0),
                    ("lamp_flux", 806.0),
                    ("utilization_factor", 0.45),
                    ("maintenance_factor", 0.8),
                ],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_office() {
        let input = LightingInput {
            room_length: 5.0,
            room_width: 4.0,
            illuminance: 300.0,
            lamp_flux: 1_500.0,
            utilization_factor: 0.5,
            maintenance_factor: 0.8,
        };
        let result = calculate(&input).unwrap();
        // 300 × 20 / 0.4 = 15000 lm, exactly 10 lamps
        assert!((result.area - 20.0).abs() < 1e-9);
        assert!((result.total_flux - 15_000.0).abs() < 1e-6);
        assert_eq!(result.lamps, 10);
    }

    #[test]
    fn test_factor_above_one_rejected() {
        let input = LightingInput {
            room_length: 5.0,
            room_width: 4.0,
            illuminance: 300.0,
            lamp_flux: 1_500.0,
            utilization_factor: 1.2,
            maintenance_factor: 0.8,
        };
        assert_eq!(calculate(&input).unwrap_err().field(), Some("utilization_factor"));
    }
}
