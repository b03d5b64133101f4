//! # Roofing Sheets Calculation
//!
//! Metal tile or corrugated sheets for one or more identical rectangular
//! slopes. Sheets are laid in columns across the slope (by useful width) and
//! rows down the slope, each row after the first losing the vertical overlap.

use serde::{Deserialize, Serialize};

use crate::calculations::{CalculatorId, Category};
use crate::definitions::{CalculatorDefinition, FieldKind, FieldSpec, ResultSpec, UsageExample};
use crate::errors::{CalcError, CalcResult};
use crate::units::{ceil_count, Meters, Millimeters, MAX_COUNT};
use crate::validation::validate_typed;
use crate::values::Values;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoofingSheetsInput {
    /// Slope length, eaves to ridge (m)
    pub slope_length: f64,
    /// Slope width along the eaves (m)
    pub slope_width: f64,
    /// Sheet length (m)
    pub sheet_length: f64,
    /// Sheet width after side laps (m)
    pub sheet_useful_width: f64,
    /// Overlap between rows (mm)
    pub vertical_overlap: f64,
    /// Number of identical slopes
    pub slopes: f64,
}

impl RoofingSheetsInput {
    pub fn from_values(values: &Values) -> CalcResult<Self> {
        Ok(RoofingSheetsInput {
            slope_length: values.require("slope_length")?,
            slope_width: values.require("slope_width")?,
            sheet_length: values.require("sheet_length")?,
            sheet_useful_width: values.require("sheet_useful_width")?,
            vertical_overlap: values.require("vertical_overlap")?,
            slopes: f64::from(values.count("slopes")?),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoofingSheetsResult {
    /// Sheet columns per slope
    pub columns: u64,
    /// Sheet rows per slope
    pub rows: u64,
    /// Sheets for all slopes
    pub sheets: u64,
    /// Roof surface (m²)
    pub roof_area: f64,
}

pub fn calculate(input: &RoofingSheetsInput) -> CalcResult<RoofingSheetsResult> {
    validate_typed(CalculatorId::RoofingSheets, input)?;

    let overlap: Meters = Millimeters(input.vertical_overlap).into();
    let overlap = overlap.value();
    if overlap >= input.sheet_length {
        return Err(CalcError::invalid_input(
            "vertical_overlap",
            input.vertical_overlap.to_string(),
            format!("must be shorter than the {} m sheet", input.sheet_length),
        ));
    }

    let id = CalculatorId::RoofingSheets;
    let columns = id.count("columns", ceil_count(input.slope_width / input.sheet_useful_width))?;
    let rows = id
        .count("rows", ceil_count((input.slope_length - overlap) / (input.sheet_length - overlap)))?
        .max(1);
    let total = columns * rows * input.slopes as u64;
    let sheets = id.count("sheets", Some(total).filter(|n| *n <= MAX_COUNT))?;

    Ok(RoofingSheetsResult {
        columns,
        rows,
        sheets,
        roof_area: input.slope_length * input.slope_width * input.slopes,
    })
}

pub fn definition() -> CalculatorDefinition {
    CalculatorDefinition {
        id: CalculatorId::RoofingSheets,
        category: Category::Roofing,
        title: "Roofing sheets",
        description: "Metal tile or corrugated sheets for rectangular roof slopes",
        inputs: vec![
            FieldSpec::new("slope_length", "Slope length", "m", FieldKind::Length, 5.0).max(100.0),
            FieldSpec::new("slope_width", "Slope width", "m", FieldKind::Length, 10.0),
            FieldSpec::new("sheet_length", "Sheet length", "m", FieldKind::Length, 2.5)
                .min(0.3)
                .max(12.0),
            FieldSpec::new("sheet_useful_width", "Useful sheet width", "m", FieldKind::Length, 1.1)
                .min(0.1)
                .max(2.0),
            FieldSpec::new("vertical_overlap", "Row overlap", "mm", FieldKind::Dimension, 150.0)
                .allow_zero()
                .max(1_000.0),
            FieldSpec::new("slopes", "Slopes", "", FieldKind::Count, 2.0).max(8.0),
        ],
        results: vec![
            ResultSpec::count("columns", "Columns per slope"),
            ResultSpec::count("rows", "Rows per slope"),
            ResultSpec::new("sheets", "Sheets", "sheets", 0),
            ResultSpec::new("roof_area", "Roof area", "m²", 1),
        ],
        examples: vec![
            UsageExample::new(
                "Gable roof, two 5 × 10 m slopes",
                [
                    ("slope_length", 5.0),
                    ("slope_width", 10.0),
                    ("sheet_length", 2.5),
                    ("sheet_useful_width", 1.1),
                    ("vertical_overlap", 150.0),
                    ("slopes", 2.0),
                ],
            ),
            UsageExample::new(
                "Lean-to carport, full-length sheets",
                [
                    ("slope_length", 3.0),
                    ("slope_width", 6.0),
                    ("sheet_length", 3.0),
                    ("sheet_useful_width", 1.15),
                    ("vertical_overlap", 0.0),
                    ("slopes", 1.0),
                ],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gable() -> RoofingSheetsInput {
        RoofingSheetsInput {
            slope_length: 5.0,
            slope_width: 10.0,
            sheet_length: 2.5,
            sheet_useful_width: 1.1,
            vertical_overlap: 150.0,
            slopes: 2.0,
        }
    }

    #[test]
    fn test_gable_roof() {
        let result = calculate(&gable()).unwrap();
        // 10 / 1.1 = 9.09 → 10 columns; 4.85 / 2.35 = 2.06 → 3 rows
        assert_eq!(result.columns, 10);
        assert_eq!(result.rows, 3);
        assert_eq!(result.sheets, 60);
        assert!((result.roof_area - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_sheet_covers_slope() {
        let mut input = gable();
        input.slope_length = 2.0;
        assert_eq!(calculate(&input).unwrap().rows, 1);
    }

    #[test]
    fn test_overlap_longer_than_sheet() {
        let mut input = gable();
        input.sheet_length = 0.5;
        input.vertical_overlap = 600.0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.field(), Some("vertical_overlap"));
    }

    #[test]
    fn test_near_zero_useful_width_rejected() {
        let mut input = gable();
        input.sheet_useful_width = 1e-300;
        assert_eq!(calculate(&input).unwrap_err().field(), Some("sheet_useful_width"));
    }

    #[test]
    fn test_overlap_leaving_a_sliver_fails_instead_of_overflowing() {
        let input = RoofingSheetsInput {
            slope_length: 100.0,
            slope_width: 1_000.0,
            sheet_length: 1.0,
            sheet_useful_width: 0.11,
            vertical_overlap: 999.999,
            slopes: 8.0,
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
        assert!(err.to_string().contains("sheets"));
    }
}
