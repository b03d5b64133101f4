//! # Calculation Engine
//!
//! The single entry point front ends call: look up the definition, validate
//! the raw inputs, dispatch to the calculator's formula and flatten its typed
//! result back into [`Values`].
//!
//! ```rust
//! use calc_core::calculations::CalculatorId;
//! use calc_core::engine::{self, CalculationOutcome};
//! use calc_core::values::Values;
//!
//! let inputs = Values::from([("voltage", 230.0), ("resistance", 46.0)]);
//! let results = engine::calculate(CalculatorId::OhmsLaw, &inputs).unwrap();
//! assert_eq!(results.get("current"), Some(5.0));
//!
//! let outcome = engine::evaluate(CalculatorId::OhmsLaw, &inputs.with("resistance", 0.0));
//! assert!(matches!(outcome, CalculationOutcome::ValidationError { .. }));
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::CalculatorId;
use crate::catalog;
use crate::errors::{CalcError, CalcResult};
use crate::validation::validate;
use crate::values::Values;

/// Validate and run one calculator.
pub fn calculate(id: CalculatorId, raw: &Values) -> CalcResult<Values> {
    let definition = catalog::definition(id);
    let inputs = validate(definition, raw)?;

    tracing::debug!(calculator = %id, inputs = inputs.len(), "dispatching calculation");
    let results = id.compute(&inputs)?;
    tracing::debug!(calculator = %id, results = results.len(), "calculation complete");

    Ok(results)
}

/// [`calculate`] with the calculator given by its string id.
pub fn calculate_by_name(id: &str, raw: &Values) -> CalcResult<Values> {
    calculate(id.parse()?, raw)
}

/// Result of a calculation in the shape a form needs: either results to
/// display, a message to attach to one field, or a general error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalculationOutcome {
    Success { results: Values },
    ValidationError { field: String, message: String },
    Error { message: String },
}

impl CalculationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CalculationOutcome::Success { .. })
    }

    pub fn results(&self) -> Option<&Values> {
        match self {
            CalculationOutcome::Success { results } => Some(results),
            _ => None,
        }
    }
}

impl From<CalcResult<Values>> for CalculationOutcome {
    fn from(result: CalcResult<Values>) -> Self {
        match result {
            Ok(results) => CalculationOutcome::Success { results },
            Err(error) => CalculationOutcome::from(error),
        }
    }
}

impl From<CalcError> for CalculationOutcome {
    fn from(error: CalcError) -> Self {
        if error.is_validation() {
            let field = match &error {
                CalcError::UnknownCalculator { .. } => "calculator".to_string(),
                other => other.field().unwrap_or_default().to_string(),
            };
            let message = match &error {
                CalcError::InvalidInput { reason, .. } => reason.clone(),
                other => other.to_string(),
            };
            CalculationOutcome::ValidationError { field, message }
        } else {
            tracing::warn!(code = error.error_code(), "calculation error: {}", error);
            CalculationOutcome::Error {
                message: error.to_string(),
            }
        }
    }
}

/// Run a calculator and fold any error into the outcome.
pub fn evaluate(id: CalculatorId, raw: &Values) -> CalculationOutcome {
    calculate(id, raw).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::FieldKind;

    #[test]
    fn test_calculate_fills_optional_defaults() {
        // openings_area and pattern_repeat omitted
        let inputs = Values::from([
            ("room_length", 5.0),
            ("room_width", 4.0),
            ("wall_height", 2.7),
            ("roll_width", 0.53),
            ("roll_length", 10.05),
            ("waste_percent", 10.0),
        ]);
        let results = calculate(CalculatorId::Wallpaper, &inputs).unwrap();
        assert_eq!(results.get("rolls"), Some(11.0));
    }

    #[test]
    fn test_counts_are_whole_numbers() {
        let definition = catalog::definition(CalculatorId::Tile);
        let results = calculate(CalculatorId::Tile, &definition.default_inputs()).unwrap();
        let tiles = results.require("tiles").unwrap();
        assert_eq!(tiles.fract(), 0.0);
    }

    #[test]
    fn test_calculate_by_name() {
        let inputs = Values::from([("voltage", 12.0), ("resistance", 6.0)]);
        let results = calculate_by_name("ohms-law", &inputs).unwrap();
        assert_eq!(results.get("current"), Some(2.0));

        let err = calculate_by_name("flux_capacitor", &inputs).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_CALCULATOR");
    }

    #[test]
    fn test_evaluate_success() {
        let inputs = Values::from([("voltage", 230.0), ("resistance", 46.0)]);
        let outcome = evaluate(CalculatorId::OhmsLaw, &inputs);
        assert!(outcome.is_success());
        assert_eq!(outcome.results().and_then(|r| r.get("power")), Some(1150.0));
    }

    #[test]
    fn test_evaluate_validation_error_names_field() {
        let inputs = Values::from([("voltage", 230.0)]);
        match evaluate(CalculatorId::OhmsLaw, &inputs) {
            CalculationOutcome::ValidationError { field, .. } => assert_eq!(field, "resistance"),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_evaluate_calculation_error() {
        let definition = catalog::definition(CalculatorId::CableSection);
        let inputs = definition.default_inputs().with("power", 500_000.0);
        let outcome = evaluate(CalculatorId::CableSection, &inputs);
        assert!(matches!(outcome, CalculationOutcome::Error { .. }));
    }

    #[test]
    fn test_extreme_accepted_inputs_never_panic() {
        for definition in catalog::all() {
            for field in &definition.inputs {
                if matches!(field.kind, FieldKind::Choice(_)) {
                    continue;
                }
                let bounds = field.bounds();
                for value in [1e-300, bounds.min, bounds.max] {
                    let inputs = definition.default_inputs().with(field.key, value);
                    if let CalculationOutcome::Success { results } = evaluate(definition.id, &inputs) {
                        assert!(
                            results.iter().all(|(_, v)| v.is_finite()),
                            "{} with {} = {} gave {:?}",
                            definition.id,
                            field.key,
                            value,
                            results
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_near_zero_stud_spacing_is_a_validation_error() {
        let definition = catalog::definition(CalculatorId::Drywall);
        let inputs = definition.default_inputs().with("stud_spacing", 1e-300);
        match evaluate(CalculatorId::Drywall, &inputs) {
            CalculationOutcome::ValidationError { field, .. } => assert_eq!(field, "stud_spacing"),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = CalculationOutcome::ValidationError {
            field: "area".to_string(),
            message: "must be greater than 0".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "validation_error");
        assert_eq!(json["field"], "area");
    }
}
