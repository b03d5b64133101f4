//! # Pipe Pressure Loss (Darcy–Weisbach)
//!
//! Friction loss of water flowing through a straight round pipe.
//!
//! ```text
//! v  = Q / (π d² / 4)
//! Re = v d / ν
//! hf = f (L / d) v² / 2g
//! Δp = ρ g hf
//! ```
//!
//! The friction factor is `64 / Re` for laminar flow (Re < 2300) and the
//! Swamee–Jain explicit approximation of Colebrook–White otherwise:
//!
//! ```text
//! f = 0.25 / [log₁₀(ε / 3.7d + 5.74 / Re^0.9)]²
//! ```
//!
//! Water properties are taken at 20 °C. Swamee–Jain holds up to a relative
//! roughness `ε/d` of 0.05; rougher inputs are rejected.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::calculations::{CalculatorId, Category};
use crate::definitions::{CalculatorDefinition, FieldKind, FieldSpec, ResultSpec, UsageExample};
use crate::errors::{CalcError, CalcResult};
use crate::units::{CubicMeters, Liters, Meters, Millimeters};
use crate::validation::validate_typed;
use crate::values::Values;

/// Kinematic viscosity of water at 20 °C (m²/s)
pub const WATER_KINEMATIC_VISCOSITY: f64 = 1.004e-6;
/// Density of water at 20 °C (kg/m³)
pub const WATER_DENSITY: f64 = 998.2;
/// Standard gravity (m/s²)
pub const GRAVITY: f64 = 9.81;
/// Upper Reynolds number of laminar flow
pub const LAMINAR_LIMIT: f64 = 2300.0;
/// Largest relative roughness `ε/d` the friction factor formula accepts
pub const MAX_RELATIVE_ROUGHNESS: f64 = 0.05;

/// Darcy friction factor for a Reynolds number and relative roughness `ε/d`.
pub fn friction_factor(reynolds: f64, relative_roughness: f64) -> f64 {
    if reynolds < LAMINAR_LIMIT {
        64.0 / reynolds
    } else {
        let term = relative_roughness / 3.7 + 5.74 / reynolds.powf(0.9);
        0.25 / term.log10().powi(2)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipePressureLossInput {
    /// Flow rate (l/s)
    pub flow_rate: f64,
    /// Pipe inner diameter (mm)
    pub inner_diameter: f64,
    /// Pipe length (m)
    pub pipe_length: f64,
    /// Absolute wall roughness (mm)
    pub roughness: f64,
}

impl PipePressureLossInput {
    pub fn from_values(values: &Values) -> CalcResult<Self> {
        Ok(PipePressureLossInput {
            flow_rate: values.require("flow_rate")?,
            inner_diameter: values.require("inner_diameter")?,
            pipe_length: values.require("pipe_length")?,
            roughness: values.require("roughness")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipePressureLossResult {
    /// Mean flow velocity (m/s)
    pub velocity: f64,
    /// Reynolds number
    pub reynolds: f64,
    /// Darcy friction factor
    pub friction_factor: f64,
    /// Friction head loss (m of water)
    pub head_loss: f64,
    /// Pressure loss (kPa)
    pub pressure_loss: f64,
}

pub fn calculate(input: &PipePressureLossInput) -> CalcResult<PipePressureLossResult> {
    validate_typed(CalculatorId::PipePressureLoss, input)?;

    let flow: CubicMeters = Liters(input.flow_rate).into();
    let diameter: Meters = Millimeters(input.inner_diameter).into();
    let roughness: Meters = Millimeters(input.roughness).into();
    let d = diameter.value();

    if input.roughness >= MAX_RELATIVE_ROUGHNESS * input.inner_diameter {
        return Err(CalcError::invalid_input(
            "roughness",
            input.roughness.to_string(),
            format!(
                "must be less than {} mm ({}% of the inner diameter)",
                MAX_RELATIVE_ROUGHNESS * input.inner_diameter,
                MAX_RELATIVE_ROUGHNESS * 100.0
            ),
        ));
    }

    let velocity = flow.value() / (PI * d * d / 4.0);
    let reynolds = velocity * d / WATER_KINEMATIC_VISCOSITY;
    let friction_factor = friction_factor(reynolds, roughness.value() / d);
    let head_loss = friction_factor * (input.pipe_length / d) * velocity.powi(2) / (2.0 * GRAVITY);

    tracing::debug!(reynolds, friction_factor, "pipe flow regime resolved");

    if !head_loss.is_finite() {
        return Err(CalcError::calculation_failed(
            CalculatorId::PipePressureLoss.as_str(),
            format!("flow of {} l/s is too small to resolve", input.flow_rate),
        ));
    }

    Ok(PipePressureLossResult {
        velocity,
        reynolds,
        friction_factor,
        head_loss,
        pressure_loss: WATER_DENSITY * GRAVITY * head_loss / 1000.0,
    })
}

pub fn definition() -> CalculatorDefinition {
    CalculatorDefinition {
        id: CalculatorId::PipePressureLoss,
        category: Category::Plumbing,
        title: "Pipe pressure loss",
        description: "Darcy-Weisbach friction loss of water in a straight pipe",
        inputs: vec![
            FieldSpec::new("flow_rate", "Flow rate", "l/s", FieldKind::Quantity, 0.5).max(1_000.0),
            FieldSpec::new("inner_diameter", "Inner diameter", "mm", FieldKind::Dimension, 20.0)
                .min(1.0)
                .max(2_000.0),
            FieldSpec::new("pipe_length", "Pipe length", "m", FieldKind::Length, 50.0),
            FieldSpec::new("roughness", "Wall roughness", "mm", FieldKind::Dimension, 0.01)
                .allow_zero()
                .max(10.0),
        ],
        results: vec![
            ResultSpec::new("velocity", "Velocity", "m/s", 2),
            ResultSpec::new("reynolds", "Reynolds number", "", 0),
            ResultSpec::new("friction_factor", "Friction factor", "", 4),
            ResultSpec::new("head_loss", "Head loss", "m", 2),
            ResultSpec::new("pressure_loss", "Pressure loss", "kPa", 1),
        ],
        examples: vec![
            UsageExample::new(
                "PEX riser, 20 mm bore, 50 m",
                [
                    ("flow_rate", 0.5),
                    ("inner_diameter", 20.0),
                    ("pipe_length", 50.0),
                    ("roughness", 0.01),
                ],
            ),
            UsageExample::new(
                "Old steel main, 50 mm bore",
                [
                    ("flow_rate", 2.0),
                    ("inner_diameter", 50.0),
                    ("pipe_length", 120.0),
                    ("roughness", 0.15),
                ],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turbulent_flow() {
        let input = PipePressureLossInput {
            flow_rate: 0.5,
            inner_diameter: 20.0,
            pipe_length: 50.0,
            roughness: 0.01,
        };
        let result = calculate(&input).unwrap();
        assert!((result.velocity - 1.5915).abs() < 1e-3);
        assert!((result.reynolds - 31_704.0).abs() < 50.0);
        assert!((result.friction_factor - 0.0246).abs() < 0.001);
        assert!((result.head_loss - 7.93).abs() < 0.1);
        assert!((result.pressure_loss - 77.6).abs() < 1.0);
    }

    #[test]
    fn test_laminar_flow() {
        let input = PipePressureLossInput {
            flow_rate: 0.001,
            inner_diameter: 20.0,
            pipe_length: 10.0,
            roughness: 0.0,
        };
        let result = calculate(&input).unwrap();
        assert!(result.reynolds < LAMINAR_LIMIT);
        assert!((result.friction_factor - 64.0 / result.reynolds).abs() < 1e-12);
    }

    #[test]
    fn test_rougher_pipe_loses_more() {
        let smooth = friction_factor(100_000.0, 0.0);
        let rough = friction_factor(100_000.0, 0.003);
        assert!(rough > smooth);
        // Smooth pipe at Re = 1e5 is close to the Blasius value 0.018
        assert!((smooth - 0.018).abs() < 0.001);
    }

    #[test]
    fn test_roughness_limited_by_diameter() {
        // 10 mm of scale in a 2.7 mm bore would put log10 of the
        // Swamee–Jain term near zero
        let input = PipePressureLossInput {
            flow_rate: 0.5,
            inner_diameter: 2.7,
            pipe_length: 10.0,
            roughness: 10.0,
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.field(), Some("roughness"));

        let too_rough = PipePressureLossInput {
            inner_diameter: 20.0,
            roughness: 1.5,
            ..input.clone()
        };
        assert_eq!(calculate(&too_rough).unwrap_err().field(), Some("roughness"));

        let below_limit = PipePressureLossInput {
            roughness: 0.99,
            ..too_rough
        };
        let result = calculate(&below_limit).unwrap();
        assert!(result.friction_factor.is_finite());
        assert!(result.friction_factor < 0.1);
    }

    #[test]
    fn test_friction_grows_with_roughness_up_to_limit() {
        let mut previous = friction_factor(100_000.0, 0.0);
        for step in 1..=50 {
            let f = friction_factor(100_000.0, step as f64 * MAX_RELATIVE_ROUGHNESS / 50.0);
            assert!(f > previous);
            previous = f;
        }
    }

    #[test]
    fn test_sub_millimetre_bore_rejected() {
        let input = PipePressureLossInput {
            flow_rate: 0.5,
            inner_diameter: 1e-300,
            pipe_length: 10.0,
            roughness: 0.0,
        };
        assert_eq!(calculate(&input).unwrap_err().field(), Some("inner_diameter"));
    }
}
