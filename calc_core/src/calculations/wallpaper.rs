//! # Wallpaper Calculation
//!
//! Estimates how many rolls are needed to paper the walls of a rectangular room.
//!
//! ## Method
//!
//! - Net wall area = room perimeter × wall height − doors and windows
//! - Waste margin is applied to the net area
//! - Rolls = ⌈area with waste / roll area⌉
//! - Strips per roll = ⌊roll length / (wall height + pattern repeat)⌋, reported
//!   so the buyer can check that a roll yields whole strips
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::wallpaper::{calculate, WallpaperInput};
//!
//! let input = WallpaperInput {
//!     room_length: 5.0,
//!     room_width: 4.0,
//!     wall_height: 2.7,
//!     openings_area: 0.0,
//!     roll_width: 0.53,
//!     roll_length: 10.05,
//!     pattern_repeat: 0.0,
//!     waste_percent: 10.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.rolls, 11);
//! assert_eq!(result.strips_per_roll, 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{CalculatorId, Category};
use crate::definitions::{CalculatorDefinition, FieldKind, FieldSpec, ResultSpec, UsageExample};
use crate::errors::{CalcError, CalcResult};
use crate::units::{ceil_count, floor_count, with_waste};
use crate::validation::validate_typed;
use crate::values::Values;

/// Input parameters for a wallpaper estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "room_length": 5.0,
///   "room_width": 4.0,
///   "wall_height": 2.7,
///   "openings_area": 3.5,
///   "roll_width": 0.53,
///   "roll_length": 10.05,
///   "pattern_repeat": 0.32,
///   "waste_percent": 10.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallpaperInput {
    /// Room length (m)
    pub room_length: f64,
    /// Room width (m)
    pub room_width: f64,
    /// Wall height from skirting to ceiling (m)
    pub wall_height: f64,
    /// Total area of doors and windows left unpapered (m²)
    pub openings_area: f64,
    /// Roll width (m), 0.53 or 1.06 for most European rolls
    pub roll_width: f64,
    /// Roll length (m)
    pub roll_length: f64,
    /// Pattern repeat added to every strip (m), 0 for plain paper
    pub pattern_repeat: f64,
    /// Waste margin (%)
    pub waste_percent: f64,
}

impl WallpaperInput {
    /// Read inputs from a normalized value map.
    pub fn from_values(values: &Values) -> CalcResult<Self> {
        Ok(WallpaperInput {
            room_length: values.require("room_length")?,
            room_width: values.require("room_width")?,
            wall_height: values.require("wall_height")?,
            openings_area: values.require("openings_area")?,
            roll_width: values.require("roll_width")?,
            roll_length: values.require("roll_length")?,
            pattern_repeat: values.require("pattern_repeat")?,
            waste_percent: values.require("waste_percent")?,
        })
    }

    /// Room perimeter (m)
    pub fn perimeter(&self) -> f64 {
        2.0 * (self.room_length + self.room_width)
    }

    /// Wall area before openings are subtracted (m²)
    pub fn gross_wall_area(&self) -> f64 {
        self.perimeter() * self.wall_height
    }
}

/// Wallpaper estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallpaperResult {
    /// Net wall area to cover (m²)
    pub wall_area: f64,
    /// Net area plus waste margin (m²)
    pub area_with_waste: f64,
    /// Rolls to buy
    pub rolls: u64,
    /// Whole strips cut from one roll
    pub strips_per_roll: u64,
}

/// Calculate the number of wallpaper rolls.
///
/// # Returns
///
/// * `Ok(WallpaperResult)` - Estimate
/// * `Err(CalcError::InvalidInput)` - A value is out of range, or the openings
///   cover the whole wall
/// * `Err(CalcError::CalculationFailed)` - A roll is shorter than one strip
pub fn calculate(input: &WallpaperInput) -> CalcResult<WallpaperResult> {
    validate_typed(CalculatorId::Wallpaper, input)?;

    let gross = input.gross_wall_area();
    if input.openings_area >= gross {
        return Err(CalcError::invalid_input(
            "openings_area",
            input.openings_area.to_string(),
            format!("must be smaller than the gross wall area of {:.2} m²", gross),
        ));
    }

    let strip_length = input.wall_height + input.pattern_repeat;
    let strips_per_roll =
        CalculatorId::Wallpaper.count("strips_per_roll", floor_count(input.roll_length / strip_length))?;
    if strips_per_roll == 0 {
        return Err(CalcError::calculation_failed(
            "wallpaper",
            format!(
                "a {} m roll cannot yield a single {:.2} m strip",
                input.roll_length, strip_length
            ),
        ));
    }

    let wall_area = gross - input.openings_area;
    let area_with_waste = with_waste(wall_area, input.waste_percent);
    let roll_area = input.roll_width * input.roll_length;

    Ok(WallpaperResult {
        wall_area,
        area_with_waste,
        rolls: CalculatorId::Wallpaper.count("rolls", ceil_count(area_with_waste / roll_area))?,
        strips_per_roll,
    })
}

/// Form metadata for the wallpaper calculator.
pub fn definition() -> CalculatorDefinition {
    CalculatorDefinition {
        id: CalculatorId::Wallpaper,
        category: Category::Finishing,
        title: "Wallpaper",
        description: "Rolls of wallpaper needed for the walls of a rectangular room",
        inputs: vec![
            FieldSpec::new("room_length", "Room length", "m", FieldKind::Length, 5.0),
            FieldSpec::new("room_width", "Room width", "m", FieldKind::Length, 4.0),
            FieldSpec::new("wall_height", "Wall height", "m", FieldKind::Length, 2.7).max(10.0),
            FieldSpec::new("openings_area", "Doors and windows", "m²", FieldKind::Area, 0.0)
                .optional()
                .allow_zero(),
            FieldSpec::new("roll_width", "Roll width", "m", FieldKind::Length, 0.53).max(5.0),
            FieldSpec::new("roll_length", "Roll length", "m", FieldKind::Length, 10.05).max(50.0),
            FieldSpec::new("pattern_repeat", "Pattern repeat", "m", FieldKind::Length, 0.0)
                .optional()
                .allow_zero()
                .max(2.0),
            FieldSpec::new("waste_percent", "Waste margin", "%", FieldKind::Percentage, 10.0),
        ],
        results: vec![
            ResultSpec::new("wall_area", "Wall area", "m²", 2),
            ResultSpec::new("area_with_waste", "Area with waste", "m²", 2),
            ResultSpec::new("rolls", "Rolls", "rolls", 0),
            ResultSpec::count("strips_per_roll", "Strips per roll"),
        ],
        examples: vec![
            UsageExample::new(
                "Bedroom 5 × 4 m, plain paper",
                [
                    ("room_length", 5.0),
                    ("room_width", 4.0),
                    ("wall_height", 2.7),
                    ("roll_width", 0.53),
                    ("roll_length", 10.05),
                    ("waste_percent", 10.0),
                ],
            ),
            UsageExample::new(
                "Living room with a door and two windows, 32 cm repeat",
                [
                    ("room_length", 6.0),
                    ("room_width", 5.0),
                    ("wall_height", 2.8),
                    ("openings_area", 3.5),
                    ("roll_width", 1.06),
                    ("roll_length", 10.05),
                    ("pattern_repeat", 0.32),
                    ("waste_percent", 15.0),
                ],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bedroom() -> WallpaperInput {
        WallpaperInput {
            room_length: 5.0,
            room_width: 4.0,
            wall_height: 2.7,
            openings_area: 0.0,
            roll_width: 0.53,
            roll_length: 10.05,
            pattern_repeat: 0.0,
            waste_percent: 10.0,
        }
    }

    #[test]
    fn test_plain_room() {
        let result = calculate(&bedroom()).unwrap();
        // 18 m perimeter × 2.7 m = 48.6 m², +10% = 53.46 m², / 5.3265 m² = 10.04 → 11
        assert!((result.wall_area - 48.6).abs() < 1e-9);
        assert!((result.area_with_waste - 53.46).abs() < 1e-9);
        assert_eq!(result.rolls, 11);
        assert_eq!(result.strips_per_roll, 3);
    }

    #[test]
    fn test_openings_reduce_rolls() {
        let mut input = bedroom();
        input.openings_area = 4.6;
        let result = calculate(&input).unwrap();
        // 44.0 m² × 1.1 = 48.4 m² / 5.3265 = 9.09 → 10
        assert!((result.wall_area - 44.0).abs() < 1e-9);
        assert_eq!(result.rolls, 10);
    }

    #[test]
    fn test_pattern_repeat_reduces_strips() {
        let mut input = bedroom();
        input.pattern_repeat = 0.64;
        // 10.05 / 3.34 = 3.0089 → 3
        assert_eq!(calculate(&input).unwrap().strips_per_roll, 3);
        input.pattern_repeat = 0.7;
        // 10.05 / 3.4 = 2.96 → 2
        assert_eq!(calculate(&input).unwrap().strips_per_roll, 2);
    }

    #[test]
    fn test_openings_cannot_cover_the_wall() {
        let mut input = bedroom();
        input.openings_area = 60.0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.field(), Some("openings_area"));
    }

    #[test]
    fn test_roll_shorter_than_wall() {
        let mut input = bedroom();
        input.wall_height = 3.5;
        input.roll_length = 3.0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_invalid_height() {
        let mut input = bedroom();
        input.wall_height = -2.7;
        assert!(calculate(&input).is_err());
    }
}
