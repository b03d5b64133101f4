//! # Share Text
//!
//! Plain-text summaries of a calculation for the clipboard or a share sheet.
//!
//! ```text
//! Paint
//!
//! Inputs:
//!   Surface area: 40 m²
//!   Coats: 2
//!
//! Results:
//!   Paint: 8.8 l
//!   Cans: 4 cans
//! ```

use std::fmt::Write;

use crate::catalog;
use crate::definitions::{CalculatorDefinition, FieldKind};
use crate::errors::{CalcError, CalcResult};
use crate::history::HistoryEntry;
use crate::values::Values;

/// Decimal places used for inputs, which carry no display precision
const INPUT_PRECISION: usize = 3;

/// Format a number to at most `precision` decimals, dropping trailing zeros.
///
/// ```rust
/// use calc_core::share::format_value;
///
/// assert_eq!(format_value(53.456, 2), "53.46");
/// assert_eq!(format_value(20.0, 2), "20");
/// assert_eq!(format_value(2.5, 3), "2.5");
/// assert_eq!(format_value(11.0, 0), "11");
/// ```
pub fn format_value(value: f64, precision: usize) -> String {
    let mut text = format!("{:.*}", precision, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

fn with_unit(value: String, unit: &str) -> String {
    if unit.is_empty() {
        value
    } else {
        format!("{} {}", value, unit)
    }
}

/// Summary of a calculation with its inputs.
pub fn format_calculation(definition: &CalculatorDefinition, inputs: &Values, results: &Values) -> String {
    render(definition, Some(inputs), results)
}

/// Summary of a calculation without its inputs.
pub fn format_results(definition: &CalculatorDefinition, results: &Values) -> String {
    render(definition, None, results)
}

fn render(definition: &CalculatorDefinition, inputs: Option<&Values>, results: &Values) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", definition.title);

    if let Some(inputs) = inputs {
        let _ = writeln!(out, "\nInputs:");
        for field in &definition.inputs {
            let Some(value) = inputs.get(field.key) else {
                continue;
            };
            let text = match field.kind {
                FieldKind::Choice(options) => options
                    .get(value as usize)
                    .map(|option| option.to_string())
                    .unwrap_or_else(|| format_value(value, 0)),
                _ => with_unit(format_value(value, INPUT_PRECISION), field.unit),
            };
            let _ = writeln!(out, "  {}: {}", field.label, text);
        }
    }

    let _ = writeln!(out, "\nResults:");
    for spec in &definition.results {
        if let Some(value) = results.get(spec.key) {
            let _ = writeln!(out, "  {}: {}", spec.label, with_unit(format_value(value, spec.precision), spec.unit));
        }
    }
    out
}

/// Summary of a stored history entry, stamped with its date.
///
/// Fails if the entry holds a result its calculator does not declare, which
/// only happens with a hand-edited or foreign history file.
pub fn format_entry(entry: &HistoryEntry, show_inputs: bool) -> CalcResult<String> {
    let definition = catalog::definition(entry.calculator_id);
    if let Some(key) = entry.results.keys().find(|key| definition.result(key).is_none()) {
        return Err(CalcError::internal(format!(
            "history entry {} has result '{}' unknown to the {} calculator",
            entry.id, key, definition.id
        )));
    }

    let inputs = show_inputs.then_some(&entry.inputs);
    let mut text = render(definition, inputs, &entry.results);
    let _ = writeln!(text, "\nCalculated {}", entry.timestamp.format("%Y-%m-%d %H:%M UTC"));
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::CalculatorId;
    use crate::engine;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(0.0, 2), "0");
        assert_eq!(format_value(-0.0001, 2), "0");
        assert_eq!(format_value(1150.0, 2), "1150");
        assert_eq!(format_value(0.091204, 4), "0.0912");
        assert_eq!(format_value(10.0, 0), "10");
    }

    #[test]
    fn test_format_calculation() {
        let definition = catalog::definition(CalculatorId::Paint);
        let inputs = definition.default_inputs();
        let results = engine::calculate(CalculatorId::Paint, &inputs).unwrap();

        let text = format_calculation(definition, &inputs, &results);
        assert!(text.starts_with("Paint\n"));
        assert!(text.contains("  Surface area: 40 m²\n"));
        assert!(text.contains("  Coats: 2\n"));
        assert!(text.contains("  Paint: 8.8 l\n"));
        assert!(text.contains("  Cans: 4 cans\n"));
    }

    #[test]
    fn test_choice_inputs_show_option_name() {
        let definition = catalog::definition(CalculatorId::CableSection);
        let inputs = definition.default_inputs().with("conductor", 1.0);
        let results = engine::calculate(CalculatorId::CableSection, &inputs).unwrap();

        let text = format_calculation(definition, &inputs, &results);
        assert!(text.contains("  Conductor: aluminium\n"));
        assert!(text.contains("  Phases: single\n"));
    }

    #[test]
    fn test_format_results_omits_inputs() {
        let definition = catalog::definition(CalculatorId::OhmsLaw);
        let results = Values::from([("current", 5.0), ("power", 1150.0)]);
        let text = format_results(definition, &results);
        assert!(!text.contains("Inputs:"));
        assert!(text.contains("  Current: 5 A\n"));
    }

    #[test]
    fn test_format_entry() {
        let inputs = Values::from([("voltage", 230.0), ("resistance", 46.0)]);
        let results = engine::calculate(CalculatorId::OhmsLaw, &inputs).unwrap();
        let entry = HistoryEntry::new(CalculatorId::OhmsLaw, inputs, results);

        let text = format_entry(&entry, true).unwrap();
        assert!(text.contains("  Voltage: 230 V\n"));
        assert!(text.contains("Calculated "));

        let short = format_entry(&entry, false).unwrap();
        assert!(!short.contains("Voltage"));
    }

    #[test]
    fn test_format_entry_rejects_foreign_results() {
        let entry = HistoryEntry::new(
            CalculatorId::OhmsLaw,
            Values::new(),
            Values::from([("rolls", 3.0)]),
        );
        assert_eq!(format_entry(&entry, true).unwrap_err().error_code(), "INTERNAL_ERROR");
    }
}
