//! # Drywall Partition Calculation
//!
//! Plasterboard sheets and metal framing for a partition or wall lining.
//!
//! ## Method
//!
//! - Net area = wall length × height − openings
//! - Sheets = ⌈net area × layers / sheet area, plus waste⌉
//! - Studs = ⌈length / spacing⌉ + 1, each the full wall height
//! - Track (floor and ceiling runner) = 2 × wall length
//! - Screws = 30 per sheet

use serde::{Deserialize, Serialize};

use crate::calculations::{CalculatorId, Category};
use crate::definitions::{CalculatorDefinition, FieldKind, FieldSpec, ResultSpec, UsageExample};
use crate::errors::{CalcError, CalcResult};
use crate::units::{ceil_count, with_waste};
use crate::validation::validate_typed;
use crate::values::Values;

/// Screws per board at a 250 mm pitch
pub const SCREWS_PER_SHEET: u64 = 30;

/// Input parameters for a drywall estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrywallInput {
    /// Wall length (m)
    pub wall_length: f64,
    /// Wall height (m)
    pub wall_height: f64,
    /// Doors and openings (m²)
    pub openings_area: f64,
    /// Sheet length (m)
    pub sheet_length: f64,
    /// Sheet width (m)
    pub sheet_width: f64,
    /// Board layers on the wall
    pub layers: f64,
    /// Stud centres (m)
    pub stud_spacing: f64,
    /// Waste margin (%)
    pub waste_percent: f64,
}

impl DrywallInput {
    pub fn from_values(values: &Values) -> CalcResult<Self> {
        Ok(DrywallInput {
            wall_length: values.require("wall_length")?,
            wall_height: values.require("wall_height")?,
            openings_area: values.require("openings_area")?,
            sheet_length: values.require("sheet_length")?,
            sheet_width: values.require("sheet_width")?,
            layers: f64::from(values.count("layers")?),
            stud_spacing: values.require("stud_spacing")?,
            waste_percent: values.require("waste_percent")?,
        })
    }
}

/// Drywall estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrywallResult {
    /// Net wall area (m²)
    pub wall_area: f64,
    /// Boards to buy
    pub sheets: u64,
    /// Vertical studs
    pub studs: u64,
    /// Total stud profile (m)
    pub stud_length: f64,
    /// Floor and ceiling track (m)
    pub track_length: f64,
    /// Drywall screws
    pub screws: u64,
}

pub fn calculate(input: &DrywallInput) -> CalcResult<DrywallResult> {
    validate_typed(CalculatorId::Drywall, input)?;

    let gross = input.wall_length * input.wall_height;
    if input.openings_area >= gross {
        return Err(CalcError::invalid_input(
            "openings_area",
            input.openings_area.to_string(),
            format!("must be smaller than the wall area of {:.2} m²", gross),
        ));
    }

    let wall_area = gross - input.openings_area;
    let sheet_area = input.sheet_length * input.sheet_width;
    let sheets = CalculatorId::Drywall.count(
        "sheets",
        ceil_count(with_waste(wall_area * input.layers / sheet_area, input.waste_percent)),
    )?;
    let studs = CalculatorId::Drywall.count("studs", ceil_count(input.wall_length / input.stud_spacing))? + 1;

    Ok(DrywallResult {
        wall_area,
        sheets,
        studs,
        stud_length: studs as f64 * input.wall_height,
        track_length: 2.0 * input.wall_length,
        screws: sheets * SCREWS_PER_SHEET,
    })
}

pub fn definition() -> CalculatorDefinition {
    CalculatorDefinition {
        id: CalculatorId::Drywall,
        category: Category::Finishing,
        title: "Drywall partition",
        description: "Plasterboard sheets, studs, track and screws for a wall",
        inputs: vec![
            FieldSpec::new("wall_length", "Wall length", "m", FieldKind::Length, 5.0),
            FieldSpec::new("wall_height", "Wall height", "m", FieldKind::Length, 2.7).max(10.0),
            FieldSpec::new("openings_area", "Doors and openings", "m²", FieldKind::Area, 0.0)
                .optional()
                .allow_zero(),
            FieldSpec::new("sheet_length", "Sheet length", "m", FieldKind::Length, 2.5)
                .min(0.5)
                .max(5.0),
            FieldSpec::new("sheet_width", "Sheet width", "m", FieldKind::Length, 1.2)
                .min(0.3)
                .max(2.0),
            FieldSpec::new("layers", "Layers", "", FieldKind::Count, 1.0).max(4.0),
            FieldSpec::new("stud_spacing", "Stud spacing", "m", FieldKind::Length, 0.6)
                .min(0.1)
                .max(2.0),
            FieldSpec::new("waste_percent", "Waste margin", "%", FieldKind::Percentage, 10.0),
        ],
        results: vec![
            ResultSpec::new("wall_area", "Wall area", "m²", 2),
            ResultSpec::new("sheets", "Sheets", "sheets", 0),
            ResultSpec::count("studs", "Studs"),
            ResultSpec::new("stud_length", "Stud profile", "m", 1),
            ResultSpec::new("track_length", "Track profile", "m", 1),
            ResultSpec::count("screws", "Screws"),
        ],
        examples: vec![
            UsageExample::new(
                "Bedroom partition with a door",
                [
                    ("wall_length", 4.2),
                    ("wall_height", 2.7),
                    ("openings_area", 1.6),
                    ("sheet_length", 2.5),
                    ("sheet_width", 1.2),
                    ("layers", 1.0),
                    ("stud_spacing", 0.6),
                    ("waste_percent", 10.0),
                ],
            ),
            UsageExample::new(
                "Double-boarded acoustic wall",
                [
                    ("wall_length", 6.0),
                    ("wall_height", 3.0),
                    ("sheet_length", 3.0),
                    ("sheet_width", 1.2),
                    ("layers", 2.0),
                    ("stud_spacing", 0.4),
                    ("waste_percent", 10.0),
                ],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partition() -> DrywallInput {
        DrywallInput {
            wall_length: 5.0,
            wall_height: 2.7,
            openings_area: 0.0,
            sheet_length: 2.5,
            sheet_width: 1.2,
            layers: 1.0,
            stud_spacing: 0.6,
            waste_percent: 10.0,
        }
    }

    #[test]
    fn test_single_layer() {
        let result = calculate(&partition()).unwrap();
        // 13.5 m² / 3.0 m² × 1.1 = 4.95 → 5 sheets
        assert_eq!(result.sheets, 5);
        // 5 / 0.6 = 8.33 → 9 bays + 1
        assert_eq!(result.studs, 10);
        assert!((result.stud_length - 27.0).abs() < 1e-9);
        assert!((result.track_length - 10.0).abs() < 1e-9);
        assert_eq!(result.screws, 150);
    }

    #[test]
    fn test_double_layer_doubles_sheets() {
        let mut input = partition();
        input.layers = 2.0;
        // 27 / 3 × 1.1 = 9.9 → 10
        assert_eq!(calculate(&input).unwrap().sheets, 10);
    }

    #[test]
    fn test_openings_larger_than_wall() {
        let mut input = partition();
        input.openings_area = 20.0;
        assert_eq!(calculate(&input).unwrap_err().field(), Some("openings_area"));
    }

    #[test]
    fn test_near_zero_stud_spacing_rejected() {
        let mut input = partition();
        input.stud_spacing = 1e-300;
        assert_eq!(calculate(&input).unwrap_err().field(), Some("stud_spacing"));

        input.stud_spacing = 0.1;
        assert_eq!(calculate(&input).unwrap_err().field(), Some("stud_spacing"));
    }

    #[test]
    fn test_narrowest_accepted_sizes_compute() {
        let mut input = partition();
        input.wall_length = 1_000.0;
        input.wall_height = 10.0;
        input.sheet_length = 0.51;
        input.sheet_width = 0.31;
        input.layers = 4.0;
        input.stud_spacing = 0.11;
        input.waste_percent = 100.0;
        let result = calculate(&input).unwrap();
        // 1000 / 0.11 = 9090.9 → 9091 bays + 1
        assert_eq!(result.studs, 9_092);
        assert_eq!(result.screws, result.sheets * SCREWS_PER_SHEET);
    }

    #[test]
    fn test_tiny_sheet_rejected() {
        let mut input = partition();
        input.sheet_width = 1e-300;
        assert_eq!(calculate(&input).unwrap_err().field(), Some("sheet_width"));
    }
}
