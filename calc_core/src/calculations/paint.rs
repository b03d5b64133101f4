//! # Paint Calculation
//!
//! Litres of paint and number of cans for a given surface, coat count and
//! manufacturer coverage (spread rate).

use serde::{Deserialize, Serialize};

use crate::calculations::{CalculatorId, Category};
use crate::definitions::{CalculatorDefinition, FieldKind, FieldSpec, ResultSpec, UsageExample};
use crate::errors::CalcResult;
use crate::units::{ceil_count, with_waste};
use crate::validation::validate_typed;
use crate::values::Values;

/// Input parameters for a paint estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaintInput {
    /// Surface to paint (m²)
    pub area: f64,
    /// Number of coats
    pub coats: f64,
    /// Spread rate from the can label (m² per litre per coat)
    pub coverage: f64,
    /// Volume of one can (l)
    pub can_volume: f64,
    /// Waste margin (%)
    pub waste_percent: f64,
}

impl PaintInput {
    pub fn from_values(values: &Values) -> CalcResult<Self> {
        Ok(PaintInput {
            area: values.require("area")?,
            coats: f64::from(values.count("coats")?),
            coverage: values.require("coverage")?,
            can_volume: values.require("can_volume")?,
            waste_percent: values.require("waste_percent")?,
        })
    }
}

/// Paint estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaintResult {
    /// Paint required including waste (l)
    pub paint_liters: f64,
    /// Cans to buy
    pub cans: u64,
}

/// Calculate paint quantity.
pub fn calculate(input: &PaintInput) -> CalcResult<PaintResult> {
    validate_typed(CalculatorId::Paint, input)?;

    let paint_liters = with_waste(input.area * input.coats / input.coverage, input.waste_percent);

    Ok(PaintResult {
        paint_liters,
        cans: CalculatorId::Paint.count("cans", ceil_count(paint_liters / input.can_volume))?,
    })
}

pub fn definition() -> CalculatorDefinition {
    CalculatorDefinition {
        id: CalculatorId::Paint,
        category: Category::Finishing,
        title: "Paint",
        description: "Litres and cans of paint for walls or ceilings",
        inputs: vec![
            FieldSpec::new("area", "Surface area", "m²", FieldKind::Area, 40.0),
            FieldSpec::new("coats", "Coats", "", FieldKind::Count, 2.0).max(10.0),
            FieldSpec::new("coverage", "Coverage", "m²/l", FieldKind::Quantity, 10.0).max(50.0),
            FieldSpec::new("can_volume", "Can volume", "l", FieldKind::Quantity, 2.5).max(100.0),
            FieldSpec::new("waste_percent", "Waste margin", "%", FieldKind::Percentage, 10.0),
        ],
        results: vec![
            ResultSpec::new("paint_liters", "Paint", "l", 2),
            ResultSpec::new("cans", "Cans", "cans", 0),
        ],
        examples: vec![
            UsageExample::new(
                "Two coats on 40 m² of walls",
                [
                    ("area", 40.0),
                    ("coats", 2.0),
                    ("coverage", 10.0),
                    ("can_volume", 2.5),
                    ("waste_percent", 10.0),
                ],
            ),
            UsageExample::new(
                "Ceiling, one coat, 9 l buckets",
                [
                    ("area", 18.0),
                    ("coats", 1.0),
                    ("coverage", 8.0),
                    ("can_volume", 9.0),
                    ("waste_percent", 5.0),
                ],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_coats() {
        let input = PaintInput {
            area: 40.0,
            coats: 2.0,
            coverage: 10.0,
            can_volume: 2.5,
            waste_percent: 10.0,
        };
        let result = calculate(&input).unwrap();
        // 40 × 2 / 10 = 8 l, +10% = 8.8 l, / 2.5 = 3.52 → 4 cans
        assert!((result.paint_liters - 8.8).abs() < 1e-9);
        assert_eq!(result.cans, 4);
    }

    #[test]
    fn test_exact_fit_does_not_round_up() {
        let input = PaintInput {
            area: 25.0,
            coats: 1.0,
            coverage: 10.0,
            can_volume: 2.5,
            waste_percent: 0.0,
        };
        assert_eq!(calculate(&input).unwrap().cans, 1);
    }

    #[test]
    fn test_zero_coats_rejected() {
        let input = PaintInput {
            area: 25.0,
            coats: 0.0,
            coverage: 10.0,
            can_volume: 2.5,
            waste_percent: 0.0,
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.field(), Some("coats"));
    }
}
