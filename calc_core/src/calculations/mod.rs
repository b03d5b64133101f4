//! # Material Calculations
//!
//! This module contains every calculator. Each one follows the pattern:
//!
//! - `*Input` - Typed input parameters (JSON-serializable)
//! - `*Result` - Typed results (JSON-serializable)
//! - `calculate(&input) -> CalcResult<*Result>` - Pure calculation function
//! - `definition()` - Form metadata consumed by the catalog and the validator
//!
//! [`CalculatorId`] is the dispatch table: it maps an identifier to the
//! typed entry point and converts between [`Values`] maps and typed structs.
//!
//! ## Available Calculations
//!
//! | Category   | Calculators |
//! |------------|-------------|
//! | Finishing  | [`wallpaper`], [`paint`], [`tile`], [`laminate`], [`plaster`], [`self_leveling_floor`], [`drywall`] |
//! | Masonry    | [`brick`], [`aerated_block`] |
//! | Concrete   | [`concrete`], [`rebar`], [`strip_foundation`], [`screed`] |
//! | Roofing    | [`roof`], [`roofing_sheets`], [`insulation`] |
//! | Electrical | [`cable_section`], [`ohms_law`], [`lighting`] |
//! | Plumbing   | [`pipe_pressure_loss`], [`radiators`] |

pub mod aerated_block;
pub mod brick;
pub mod cable_section;
pub mod concrete;
pub mod drywall;
pub mod insulation;
pub mod laminate;
pub mod lighting;
pub mod ohms_law;
pub mod paint;
pub mod pipe_pressure_loss;
pub mod plaster;
pub mod radiators;
pub mod rebar;
pub mod roof;
pub mod roofing_sheets;
pub mod screed;
pub mod self_leveling_floor;
pub mod strip_foundation;
pub mod tile;
pub mod wallpaper;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::definitions::CalculatorDefinition;
use crate::errors::{CalcError, CalcResult};
use crate::units::MAX_COUNT;
use crate::values::Values;

/// Calculator groups as shown on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Wall and floor finishes
    Finishing,
    /// Brick and block walls
    Masonry,
    /// Slabs, foundations, reinforcement, screeds
    Concrete,
    /// Roof geometry, coverings, insulation
    Roofing,
    /// Cables, circuits, lighting
    Electrical,
    /// Piping and heating
    Plumbing,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 6] = [
        Category::Finishing,
        Category::Masonry,
        Category::Concrete,
        Category::Roofing,
        Category::Electrical,
        Category::Plumbing,
    ];

    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Finishing => "Finishing",
            Category::Masonry => "Masonry",
            Category::Concrete => "Concrete & Foundations",
            Category::Roofing => "Roofing & Insulation",
            Category::Electrical => "Electrical",
            Category::Plumbing => "Plumbing & Heating",
        }
    }

    /// Identifier used on the command line and in JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Finishing => "finishing",
            Category::Masonry => "masonry",
            Category::Concrete => "concrete",
            Category::Roofing => "roofing",
            Category::Electrical => "electrical",
            Category::Plumbing => "plumbing",
        }
    }

    /// Sort order on the home screen (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            Category::Finishing => 1,
            Category::Masonry => 2,
            Category::Concrete => 3,
            Category::Roofing => 4,
            Category::Electrical => 5,
            Category::Plumbing => 6,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| CalcError::invalid_input("category", s, "unknown category"))
    }
}

/// Identifier of every available calculator.
///
/// Declaration order is catalog order; `ALL` must list variants in the
/// same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorId {
    Wallpaper,
    Paint,
    Tile,
    Laminate,
    Plaster,
    SelfLevelingFloor,
    Drywall,
    Brick,
    AeratedBlock,
    Concrete,
    Rebar,
    StripFoundation,
    Screed,
    Roof,
    RoofingSheets,
    Insulation,
    CableSection,
    OhmsLaw,
    Lighting,
    PipePressureLoss,
    Radiators,
}

impl CalculatorId {
    /// All calculators in catalog order
    pub const ALL: [CalculatorId; 21] = [
        CalculatorId::Wallpaper,
        CalculatorId::Paint,
        CalculatorId::Tile,
        CalculatorId::Laminate,
        CalculatorId::Plaster,
        CalculatorId::SelfLevelingFloor,
        CalculatorId::Drywall,
        CalculatorId::Brick,
        CalculatorId::AeratedBlock,
        CalculatorId::Concrete,
        CalculatorId::Rebar,
        CalculatorId::StripFoundation,
        CalculatorId::Screed,
        CalculatorId::Roof,
        CalculatorId::RoofingSheets,
        CalculatorId::Insulation,
        CalculatorId::CableSection,
        CalculatorId::OhmsLaw,
        CalculatorId::Lighting,
        CalculatorId::PipePressureLoss,
        CalculatorId::Radiators,
    ];

    /// Stable identifier string (matches the serde name)
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculatorId::Wallpaper => "wallpaper",
            CalculatorId::Paint => "paint",
            CalculatorId::Tile => "tile",
            CalculatorId::Laminate => "laminate",
            CalculatorId::Plaster => "plaster",
            CalculatorId::SelfLevelingFloor => "self_leveling_floor",
            CalculatorId::Drywall => "drywall",
            CalculatorId::Brick => "brick",
            CalculatorId::AeratedBlock => "aerated_block",
            CalculatorId::Concrete => "concrete",
            CalculatorId::Rebar => "rebar",
            CalculatorId::StripFoundation => "strip_foundation",
            CalculatorId::Screed => "screed",
            CalculatorId::Roof => "roof",
            CalculatorId::RoofingSheets => "roofing_sheets",
            CalculatorId::Insulation => "insulation",
            CalculatorId::CableSection => "cable_section",
            CalculatorId::OhmsLaw => "ohms_law",
            CalculatorId::Lighting => "lighting",
            CalculatorId::PipePressureLoss => "pipe_pressure_loss",
            CalculatorId::Radiators => "radiators",
        }
    }

    /// Position in [`CalculatorId::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Build the form metadata for this calculator.
    ///
    /// Prefer [`crate::catalog::definition`], which builds each definition once.
    pub fn build_definition(&self) -> CalculatorDefinition {
        match self {
            CalculatorId::Wallpaper => wallpaper::definition(),
            CalculatorId::Paint => paint::definition(),
            CalculatorId::Tile => tile::definition(),
            CalculatorId::Laminate => laminate::definition(),
            CalculatorId::Plaster => plaster::definition(),
            CalculatorId::SelfLevelingFloor => self_leveling_floor::definition(),
            CalculatorId::Drywall => drywall::definition(),
            CalculatorId::Brick => brick::definition(),
            CalculatorId::AeratedBlock => aerated_block::definition(),
            CalculatorId::Concrete => concrete::definition(),
            CalculatorId::Rebar => rebar::definition(),
            CalculatorId::StripFoundation => strip_foundation::definition(),
            CalculatorId::Screed => screed::definition(),
            CalculatorId::Roof => roof::definition(),
            CalculatorId::RoofingSheets => roofing_sheets::definition(),
            CalculatorId::Insulation => insulation::definition(),
            CalculatorId::CableSection => cable_section::definition(),
            CalculatorId::OhmsLaw => ohms_law::definition(),
            CalculatorId::Lighting => lighting::definition(),
            CalculatorId::PipePressureLoss => pipe_pressure_loss::definition(),
            CalculatorId::Radiators => radiators::definition(),
        }
    }

    /// Unwrap a rounded piece count, failing with `CalculationFailed` when it
    /// fell outside the countable range.
    pub fn count(&self, what: &str, count: Option<u64>) -> CalcResult<u64> {
        count.ok_or_else(|| {
            CalcError::calculation_failed(
                self.as_str(),
                format!("{} would exceed {} pieces; check the sizes entered", what, MAX_COUNT),
            )
        })
    }

    /// Run the typed calculation for a normalized input map.
    ///
    /// `inputs` should come out of [`crate::validation::validate`]; the typed
    /// entry points re-check their own ranges regardless.
    pub fn compute(&self, inputs: &Values) -> CalcResult<Values> {
        match self {
            CalculatorId::Wallpaper => {
                to_values(*self, &wallpaper::calculate(&wallpaper::WallpaperInput::from_values(inputs)?)?)
            }
            CalculatorId::Paint => to_values(*self, &paint::calculate(&paint::PaintInput::from_values(inputs)?)?),
            CalculatorId::Tile => to_values(*self, &tile::calculate(&tile::TileInput::from_values(inputs)?)?),
            CalculatorId::Laminate => {
                to_values(*self, &laminate::calculate(&laminate::LaminateInput::from_values(inputs)?)?)
            }
            CalculatorId::Plaster => {
                to_values(*self, &plaster::calculate(&plaster::PlasterInput::from_values(inputs)?)?)
            }
            CalculatorId::SelfLevelingFloor => to_values(*self, &self_leveling_floor::calculate(
                &self_leveling_floor::SelfLevelingInput::from_values(inputs)?,
            )?),
            CalculatorId::Drywall => {
                to_values(*self, &drywall::calculate(&drywall::DrywallInput::from_values(inputs)?)?)
            }
            CalculatorId::Brick => to_values(*self, &brick::calculate(&brick::BrickInput::from_values(inputs)?)?),
            CalculatorId::AeratedBlock => to_values(*self, &aerated_block::calculate(
                &aerated_block::AeratedBlockInput::from_values(inputs)?,
            )?),
            CalculatorId::Concrete => {
                to_values(*self, &concrete::calculate(&concrete::ConcreteInput::from_values(inputs)?)?)
            }
            CalculatorId::Rebar => to_values(*self, &rebar::calculate(&rebar::RebarInput::from_values(inputs)?)?),
            CalculatorId::StripFoundation => to_values(*self, &strip_foundation::calculate(
                &strip_foundation::StripFoundationInput::from_values(inputs)?,
            )?),
            CalculatorId::Screed => to_values(*self, &screed::calculate(&screed::ScreedInput::from_values(inputs)?)?),
            CalculatorId::Roof => to_values(*self, &roof::calculate(&roof::RoofInput::from_values(inputs)?)?),
            CalculatorId::RoofingSheets => to_values(*self, &roofing_sheets::calculate(
                &roofing_sheets::RoofingSheetsInput::from_values(inputs)?,
            )?),
            CalculatorId::Insulation => {
                to_values(*self, &insulation::calculate(&insulation::InsulationInput::from_values(inputs)?)?)
            }
            CalculatorId::CableSection => to_values(*self, &cable_section::calculate(
                &cable_section::CableSectionInput::from_values(inputs)?,
            )?),
            CalculatorId::OhmsLaw => {
                to_values(*self, &ohms_law::calculate(&ohms_law::OhmsLawInput::from_values(inputs)?)?)
            }
            CalculatorId::Lighting => {
                to_values(*self, &lighting::calculate(&lighting::LightingInput::from_values(inputs)?)?)
            }
            CalculatorId::PipePressureLoss => to_values(*self, &pipe_pressure_loss::calculate(
                &pipe_pressure_loss::PipePressureLossInput::from_values(inputs)?,
            )?),
            CalculatorId::Radiators => {
                to_values(*self, &radiators::calculate(&radiators::RadiatorsInput::from_values(inputs)?)?)
            }
        }
    }
}

impl fmt::Display for CalculatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for CalculatorId {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace('-', "_");
        CalculatorId::ALL
            .into_iter()
            .find(|id| id.as_str() == needle)
            .ok_or_else(|| CalcError::unknown_calculator(s))
    }
}

/// Flatten a typed result. Non-finite numbers serialize as `null` and mean
/// the inputs pushed a formula out of `f64` range.
fn to_values<T: Serialize>(id: CalculatorId, result: &T) -> CalcResult<Values> {
    let json = serde_json::to_value(result)?;
    let overflowed = json
        .as_object()
        .and_then(|fields| fields.iter().find(|(_, value)| value.is_null()))
        .map(|(key, _)| key.clone());
    if let Some(key) = overflowed {
        return Err(CalcError::calculation_failed(
            id.as_str(),
            format!("{} is out of numeric range; check the sizes entered", key),
        ));
    }
    Values::from_serializable(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_count_out_of_range_fails() {
        assert_eq!(CalculatorId::Paint.count("cans", Some(4)).unwrap(), 4);
        let err = CalculatorId::Drywall.count("studs", None).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
        assert!(err.to_string().contains("drywall"));
        assert!(err.to_string().contains("studs"));
    }

    #[test]
    fn test_non_finite_result_fails() {
        #[derive(Serialize)]
        struct Blown {
            current: f64,
        }
        let err = to_values(CalculatorId::OhmsLaw, &Blown { current: f64::INFINITY }).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
        assert!(err.to_string().contains("current"));
    }

    #[test]
    fn test_all_ids_unique_and_ordered() {
        let unique: HashSet<_> = CalculatorId::ALL.iter().map(|id| id.as_str()).collect();
        assert_eq!(unique.len(), CalculatorId::ALL.len());
        for (i, id) in CalculatorId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i, "{} is out of order", id);
        }
    }

    #[test]
    fn test_id_string_roundtrip() {
        for id in CalculatorId::ALL {
            assert_eq!(id.as_str().parse::<CalculatorId>().unwrap(), id);
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn test_id_parsing_is_lenient_on_case_and_dashes() {
        assert_eq!("Cable-Section".parse::<CalculatorId>().unwrap(), CalculatorId::CableSection);
        let err = "staircase".parse::<CalculatorId>().unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_CALCULATOR");
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("Roofing".parse::<Category>().unwrap(), Category::Roofing);
        assert!("gardening".parse::<Category>().is_err());
    }

    #[test]
    fn test_definition_matches_id() {
        for id in CalculatorId::ALL {
            assert_eq!(id.build_definition().id, id);
        }
    }
}
