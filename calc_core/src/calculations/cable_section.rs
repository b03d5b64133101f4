//! # Cable Cross-Section Selection
//!
//! Picks the smallest standard conductor cross-section that both carries the
//! load current and keeps the voltage drop within the allowed limit.
//!
//! ## Method
//!
//! Load current:
//!
//! ```text
//! single phase:  I = P / (U × cos φ)
//! three phase:   I = P / (√3 × U × cos φ)      (U = line voltage)
//! ```
//!
//! Minimum cross-section from the voltage drop limit ΔU = U × drop / 100:
//!
//! ```text
//! single phase:  S = 2 × ρ × L × I × cos φ / ΔU
//! three phase:   S = √3 × ρ × L × I × cos φ / ΔU
//! ```
//!
//! The recommended section is the first entry of the conductor's ampacity
//! table whose rated current is at least `I` and whose section is at least
//! `S`. Ratings are for cables laid open in air.

use serde::{Deserialize, Serialize};

use crate::calculations::{CalculatorId, Category};
use crate::definitions::{CalculatorDefinition, FieldKind, FieldSpec, ResultSpec, UsageExample};
use crate::errors::{CalcError, CalcResult};
use crate::validation::validate_typed;
use crate::values::Values;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Copper: (cross-section mm², continuous current A)
pub const COPPER_AMPACITY: [(f64, f64); 12] = [
    (1.5, 19.0),
    (2.5, 25.0),
    (4.0, 35.0),
    (6.0, 42.0),
    (10.0, 55.0),
    (16.0, 75.0),
    (25.0, 95.0),
    (35.0, 120.0),
    (50.0, 145.0),
    (70.0, 180.0),
    (95.0, 220.0),
    (120.0, 260.0),
];

/// Aluminium: (cross-section mm², continuous current A)
pub const ALUMINIUM_AMPACITY: [(f64, f64); 11] = [
    (2.5, 19.0),
    (4.0, 28.0),
    (6.0, 32.0),
    (10.0, 47.0),
    (16.0, 60.0),
    (25.0, 75.0),
    (35.0, 90.0),
    (50.0, 110.0),
    (70.0, 140.0),
    (95.0, 170.0),
    (120.0, 200.0),
];

/// Conductor material, carried as its option index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub enum Conductor {
    Copper,
    Aluminium,
}

impl Conductor {
    pub const OPTIONS: &'static [&'static str] = &["copper", "aluminium"];

    /// Resistivity at 20 °C (Ω·mm²/m)
    pub fn resistivity(&self) -> f64 {
        match self {
            Conductor::Copper => 0.0175,
            Conductor::Aluminium => 0.028,
        }
    }

    pub fn ampacity_table(&self) -> &'static [(f64, f64)] {
        match self {
            Conductor::Copper => &COPPER_AMPACITY,
            Conductor::Aluminium => &ALUMINIUM_AMPACITY,
        }
    }
}

impl From<Conductor> for f64 {
    fn from(conductor: Conductor) -> f64 {
        f64::from(conductor as u8)
    }
}

impl TryFrom<f64> for Conductor {
    type Error = CalcError;

    fn try_from(index: f64) -> CalcResult<Self> {
        match index as i64 {
            0 if index == 0.0 => Ok(Conductor::Copper),
            1 if index == 1.0 => Ok(Conductor::Aluminium),
            _ => Err(CalcError::invalid_input(
                "conductor",
                index.to_string(),
                "must be 0 (copper) or 1 (aluminium)",
            )),
        }
    }
}

/// Supply system, carried as its option index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub enum Phases {
    Single,
    Three,
}

impl Phases {
    pub const OPTIONS: &'static [&'static str] = &["single", "three"];

    /// Multiplier on `ρ × L × I × cos φ` giving the voltage drop
    fn drop_factor(&self) -> f64 {
        match self {
            Phases::Single => 2.0,
            Phases::Three => SQRT_3,
        }
    }
}

impl From<Phases> for f64 {
    fn from(phases: Phases) -> f64 {
        f64::from(phases as u8)
    }
}

impl TryFrom<f64> for Phases {
    type Error = CalcError;

    fn try_from(index: f64) -> CalcResult<Self> {
        match index as i64 {
            0 if index == 0.0 => Ok(Phases::Single),
            1 if index == 1.0 => Ok(Phases::Three),
            _ => Err(CalcError::invalid_input(
                "phases",
                index.to_string(),
                "must be 0 (single) or 1 (three)",
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CableSectionInput {
    /// Load power (W)
    pub power: f64,
    /// Supply voltage, line voltage for three phase (V)
    pub voltage: f64,
    /// One-way cable length (m)
    pub cable_length: f64,
    /// Allowed voltage drop (%)
    pub max_voltage_drop: f64,
    /// Load power factor cos φ
    pub power_factor: f64,
    pub conductor: Conductor,
    pub phases: Phases,
}

impl CableSectionInput {
    pub fn from_values(values: &Values) -> CalcResult<Self> {
        Ok(CableSectionInput {
            power: values.require("power")?,
            voltage: values.require("voltage")?,
            cable_length: values.require("cable_length")?,
            max_voltage_drop: values.require("max_voltage_drop")?,
            power_factor: values.require("power_factor")?,
            conductor: Conductor::try_from(values.require("conductor")?)?,
            phases: Phases::try_from(values.require("phases")?)?,
        })
    }

    /// Load current (A)
    pub fn current(&self) -> f64 {
        let line_factor = match self.phases {
            Phases::Single => 1.0,
            Phases::Three => SQRT_3,
        };
        self.power / (line_factor * self.voltage * self.power_factor)
    }

    /// Voltage drop (V) over the cable for a given cross-section (mm²)
    fn voltage_drop(&self, section: f64) -> f64 {
        self.phases.drop_factor()
            * self.conductor.resistivity()
            * self.cable_length
            * self.current()
            * self.power_factor
            / section
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CableSectionResult {
    /// Load current (A)
    pub current: f64,
    /// Smallest section meeting the voltage drop limit (mm²)
    pub min_section: f64,
    /// Standard section to install (mm²)
    pub recommended_section: f64,
    /// Voltage drop with the recommended section (%)
    pub voltage_drop_percent: f64,
}

/// Select a cable cross-section.
///
/// # Returns
///
/// * `Err(CalcError::CalculationFailed)` - No standard section up to 120 mm²
///   carries the load within the drop limit
pub fn calculate(input: &CableSectionInput) -> CalcResult<CableSectionResult> {
    validate_typed(CalculatorId::CableSection, input)?;

    let current = input.current();
    let allowed_drop = input.voltage * input.max_voltage_drop / 100.0;
    let min_section = input.voltage_drop(1.0) / allowed_drop;

    let recommended_section = input
        .conductor
        .ampacity_table()
        .iter()
        .find(|(section, rated)| *rated >= current && *section >= min_section)
        .map(|(section, _)| *section)
        .ok_or_else(|| {
            CalcError::calculation_failed(
                "cable_section",
                format!(
                    "{:.1} A needs more than the largest standard section ({:.2} mm² for the drop limit)",
                    current, min_section
                ),
            )
        })?;

    tracing::debug!(current, min_section, recommended_section, "cable section selected");

    Ok(CableSectionResult {
        current,
        min_section,
        recommended_section,
        voltage_drop_percent: input.voltage_drop(recommended_section) / input.voltage * 100.0,
    })
}

pub fn definition() -> CalculatorDefinition {
    CalculatorDefinition {
        id: CalculatorId::CableSection,
        category: Category::Electrical,
        title: "Cable cross-section",
        description: "Cable size by load current and voltage drop, copper or aluminium",
        inputs: vec![
            FieldSpec::new("power", "Load power", "W", FieldKind::Quantity, 5_000.0).max(1_000_000.0),
            FieldSpec::new("voltage", "Voltage", "V", FieldKind::Quantity, 230.0).max(1_000.0),
            FieldSpec::new("cable_length", "Cable length", "m", FieldKind::Length, 20.0),
            FieldSpec::new("max_voltage_drop", "Allowed drop", "%", FieldKind::Percentage, 3.0).min(0.0),
            FieldSpec::new("power_factor", "Power factor", "", FieldKind::Quantity, 0.95).max(1.0),
            FieldSpec::new("conductor", "Conductor", "", FieldKind::Choice(Conductor::OPTIONS), 0.0),
            FieldSpec::new("phases", "Phases", "", FieldKind::Choice(Phases::OPTIONS), 0.0),
        ],
        results: vec![
            ResultSpec::new("current", "Current", "A", 2),
            ResultSpec::new("min_section", "Minimum section", "mm²", 2),
            ResultSpec::new("recommended_section", "Recommended section", "mm²", 1),
            ResultSpec::new("voltage_drop_percent", "Voltage drop", "%", 2),
        ],
        examples: vec![
            UsageExample::new(
                "Kitchen cooker, 5 kW, 20 m copper",
                [
                    ("power", 5_000.0),
                    ("voltage", 230.0),
                    ("cable_length", 20.0),
                    ("max_voltage_drop", 3.0),
                    ("power_factor", 0.95),
                    ("conductor", 0.0),
                    ("phases", 0.0),
                ],
            ),
            UsageExample::new(
                "Workshop feed, 15 kW three phase, 50 m aluminium",
                [
                    ("power", 15_000.0),
                    ("voltage", 400.0),
                    ("cable_length", 50.0),
                    ("max_voltage_drop", 5.0),
                    ("power_factor", 0.9),
                    ("conductor", 1.0),
                    ("phases", 1.0),
                ],
            ),
        ],
    }
}
