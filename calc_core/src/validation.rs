//! # Input Validation
//!
//! A single pass over a calculator's declared fields, checking each raw value
//! against the range of its [`FieldKind`] (and any per-field override) before
//! the formula runs.
//!
//! Rules, per field in declaration order:
//!
//! 1. Missing optional fields take their default; missing required fields fail.
//! 2. Values must be finite.
//! 3. `allow_zero` fields accept exactly zero.
//! 4. Counts and choices must be whole numbers.
//! 5. The value must lie in the field's bounds.
//!
//! Keys the calculator does not declare are rejected before any field is checked.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::CalculatorId;
//! use calc_core::catalog;
//! use calc_core::validation::validate;
//! use calc_core::values::Values;
//!
//! let definition = catalog::definition(CalculatorId::OhmsLaw);
//! let ok = validate(definition, &Values::from([("voltage", 230.0), ("resistance", 46.0)]));
//! assert!(ok.is_ok());
//!
//! let err = validate(definition, &Values::from([("voltage", 230.0), ("resistance", -1.0)]))
//!     .unwrap_err();
//! assert_eq!(err.field(), Some("resistance"));
//! ```

use serde::Serialize;

use crate::calculations::CalculatorId;
use crate::catalog;
use crate::definitions::{CalculatorDefinition, FieldKind, FieldSpec};
use crate::errors::{CalcError, CalcResult};
use crate::values::Values;

/// Validate raw inputs, returning the normalized map (optional defaults filled in).
pub fn validate(definition: &CalculatorDefinition, raw: &Values) -> CalcResult<Values> {
    if let Some((key, value)) = raw.iter().find(|(key, _)| definition.field(key).is_none()) {
        return Err(CalcError::invalid_input(
            key,
            value.to_string(),
            format!("not an input of the {} calculator", definition.id),
        ));
    }

    let mut normalized = Values::new();
    for field in &definition.inputs {
        let value = match raw.get(field.key) {
            Some(value) => value,
            None if field.optional => field.default,
            None => {
                tracing::debug!(calculator = %definition.id, field = field.key, "missing required input");
                return Err(CalcError::missing_field(field.key));
            }
        };
        if let Err(e) = validate_field(field, value) {
            tracing::debug!(calculator = %definition.id, field = field.key, value, "input rejected");
            return Err(e);
        }
        normalized.insert(field.key, value);
    }
    Ok(normalized)
}

/// Check one value against one field spec.
pub fn validate_field(field: &FieldSpec, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(
            field.key,
            value.to_string(),
            "must be a finite number",
        ));
    }
    if field.allow_zero && value == 0.0 {
        return Ok(());
    }
    if field.kind.is_integer() && value.fract() != 0.0 {
        return Err(CalcError::invalid_input(
            field.key,
            value.to_string(),
            "must be a whole number",
        ));
    }

    let bounds = field.bounds();
    if !bounds.contains(value) {
        let reason = match field.kind {
            FieldKind::Choice(options) => {
                format!("must be an option index below {} ({})", options.len(), options.join(", "))
            }
            _ if field.unit.is_empty() => bounds.describe(),
            _ => format!("{} {}", bounds.describe(), field.unit),
        };
        return Err(CalcError::invalid_input(field.key, value.to_string(), reason));
    }
    Ok(())
}

/// Validate a typed input struct against its calculator's definition.
///
/// Typed entry points call this so they are safe to use without going
/// through the engine.
pub fn validate_typed<T: Serialize>(id: CalculatorId, input: &T) -> CalcResult<()> {
    let values = Values::from_serializable(input)?;
    validate(catalog::definition(id), &values).map(|_| ())
}
