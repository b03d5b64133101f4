//! Ohm's law: current and dissipated power from voltage and resistance.

use serde::{Deserialize, Serialize};

use crate::calculations::{CalculatorId, Category};
use crate::definitions::{CalculatorDefinition, FieldKind, FieldSpec, ResultSpec, UsageExample};
use crate::errors::CalcResult;
use crate::validation::validate_typed;
use crate::values::Values;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OhmsLawInput {
    /// Voltage (V)
    pub voltage: f64,
    /// Resistance (Ω)
    pub resistance: f64,
}

impl OhmsLawInput {
    pub fn from_values(values: &Values) -> CalcResult<Self> {
        Ok(OhmsLawInput {
            voltage: values.require("voltage")?,
            resistance: values.require("resistance")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OhmsLawResult {
    /// Current (A)
    pub current: f64,
    /// Power (W)
    pub power: f64,
}

pub fn calculate(input: &OhmsLawInput) -> CalcResult<OhmsLawResult> {
    validate_typed(CalculatorId::OhmsLaw, input)?;

    let current = input.voltage / input.resistance;
    Ok(OhmsLawResult {
        current,
        power: input.voltage * current,
    })
}

pub fn definition() -> CalculatorDefinition {
    CalculatorDefinition {
        id: CalculatorId::OhmsLaw,
        category: Category::Electrical,
        title: "Ohm's law",
        description: "Current and power from voltage and resistance",
        inputs: vec![
            FieldSpec::new("voltage", "Voltage", "V", FieldKind::Quantity, 230.0).max(1_000_000.0),
            FieldSpec::new("resistance", "Resistance", "Ω", FieldKind::Quantity, 46.0),
        ],
        results: vec![
            ResultSpec::new("current", "Current", "A", 3),
            ResultSpec::new("power", "Power", "W", 2),
        ],
        examples: vec![
            UsageExample::new("Mains heater element", [("voltage", 230.0), ("resistance", 46.0)]),
            UsageExample::new("12 V LED strip", [("voltage", 12.0), ("resistance", 8.0)]),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heater_element() {
        let result = calculate(&OhmsLawInput { voltage: 230.0, resistance: 46.0 }).unwrap();
        assert!((result.current - 5.0).abs() < 1e-12);
        assert!((result.power - 1150.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_resistance_rejected() {
        let err = calculate(&OhmsLawInput { voltage: 12.0, resistance: 0.0 }).unwrap_err();
        assert_eq!(err.field(), Some("resistance"));
    }
}
