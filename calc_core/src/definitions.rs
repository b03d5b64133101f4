//! # Calculator Definitions
//!
//! Static metadata describing each calculator's form: which inputs it takes
//! (with units, defaults and accepted ranges), which results it reports and
//! a few worked examples. The validator reads the same metadata, so the
//! ranges a form advertises are the ranges that get enforced.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::definitions::{FieldKind, FieldSpec};
//!
//! let field = FieldSpec::new("wall_height", "Wall height", "m", FieldKind::Length, 2.7);
//! assert!(field.bounds().contains(2.7));
//! assert!(!field.bounds().contains(0.0));
//!
//! let openings = FieldSpec::new("openings_area", "Doors and windows", "m²", FieldKind::Area, 0.0)
//!     .optional()
//!     .allow_zero();
//! assert!(openings.optional);
//! ```

use serde::Serialize;

use crate::calculations::{CalculatorId, Category};
use crate::values::Values;

// ============================================================================
// Field Kinds and Bounds
// ============================================================================

/// Accepted range of a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: f64,
    pub min_inclusive: bool,
    pub max: f64,
    pub max_inclusive: bool,
}

impl Bounds {
    /// `min < x <= max`
    pub const fn positive_up_to(max: f64) -> Self {
        Bounds {
            min: 0.0,
            min_inclusive: false,
            max,
            max_inclusive: true,
        }
    }

    /// `min <= x <= max`
    pub const fn closed(min: f64, max: f64) -> Self {
        Bounds {
            min,
            min_inclusive: true,
            max,
            max_inclusive: true,
        }
    }

    /// Whether `value` lies in the range
    pub fn contains(&self, value: f64) -> bool {
        let above_min = if self.min_inclusive { value >= self.min } else { value > self.min };
        let below_max = if self.max_inclusive { value <= self.max } else { value < self.max };
        above_min && below_max
    }

    /// Human-readable range, e.g. "must be greater than 0 and at most 1000"
    pub fn describe(&self) -> String {
        let lower = if self.min_inclusive { "at least" } else { "greater than" };
        let upper = if self.max_inclusive { "at most" } else { "less than" };
        format!("must be {} {} and {} {}", lower, self.min, upper, self.max)
    }
}

/// Declared type of an input field. Each kind carries its default range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "options")]
pub enum FieldKind {
    /// Room and wall lengths in metres
    Length,
    /// Material dimensions in millimetres
    Dimension,
    /// Surface area in m²
    Area,
    /// Volume in m³
    Volume,
    /// 0 to 100 percent
    Percentage,
    /// Whole number of pieces, layers, coats
    Count,
    /// Angle in degrees, strictly between 0 and 90
    Angle,
    /// Any other positive physical quantity (power, density, coverage)
    Quantity,
    /// Index into a fixed list of options
    Choice(&'static [&'static str]),
}

impl FieldKind {
    /// Default accepted range for the kind
    pub fn bounds(&self) -> Bounds {
        match self {
            FieldKind::Length => Bounds::positive_up_to(1_000.0),
            FieldKind::Dimension => Bounds::positive_up_to(10_000.0),
            FieldKind::Area => Bounds::positive_up_to(100_000.0),
            FieldKind::Volume => Bounds::positive_up_to(10_000.0),
            FieldKind::Percentage => Bounds::closed(0.0, 100.0),
            FieldKind::Count => Bounds::closed(1.0, 10_000.0),
            FieldKind::Angle => Bounds {
                min: 0.0,
                min_inclusive: false,
                max: 90.0,
                max_inclusive: false,
            },
            FieldKind::Quantity => Bounds::positive_up_to(1e9),
            FieldKind::Choice(options) => Bounds {
                min: 0.0,
                min_inclusive: true,
                max: options.len() as f64,
                max_inclusive: false,
            },
        }
    }

    /// Whether values must be whole numbers
    pub fn is_integer(&self) -> bool {
        matches!(self, FieldKind::Count | FieldKind::Choice(_))
    }

    /// Short name used in messages and listings
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldKind::Length => "length",
            FieldKind::Dimension => "dimension",
            FieldKind::Area => "area",
            FieldKind::Volume => "volume",
            FieldKind::Percentage => "percentage",
            FieldKind::Count => "count",
            FieldKind::Angle => "angle",
            FieldKind::Quantity => "quantity",
            FieldKind::Choice(_) => "choice",
        }
    }
}

// ============================================================================
// Field and Result Specs
// ============================================================================

/// One input of a calculator form.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    /// Key used in input maps
    pub key: &'static str,
    /// Form label
    pub label: &'static str,
    /// Unit shown beside the field
    pub unit: &'static str,
    pub kind: FieldKind,
    /// Prefilled value; also used when an optional field is omitted
    pub default: f64,
    /// May be omitted from the input map
    pub optional: bool,
    /// Exactly zero is accepted in addition to the kind's range
    pub allow_zero: bool,
    /// Exclusive lower bound replacing the kind's minimum
    pub min: Option<f64>,
    /// Inclusive upper bound replacing the kind's maximum
    pub max: Option<f64>,
}

impl FieldSpec {
    pub fn new(key: &'static str, label: &'static str, unit: &'static str, kind: FieldKind, default: f64) -> Self {
        FieldSpec {
            key,
            label,
            unit,
            kind,
            default,
            optional: false,
            allow_zero: false,
            min: None,
            max: None,
        }
    }

    /// Field may be omitted; the default is used instead.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Accept exactly zero.
    pub fn allow_zero(mut self) -> Self {
        self.allow_zero = true;
        self
    }

    /// Require `value > min`.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Require `value <= max`.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Effective range after overrides
    pub fn bounds(&self) -> Bounds {
        let mut bounds = self.kind.bounds();
        if let Some(min) = self.min {
            bounds.min = min;
            bounds.min_inclusive = false;
        }
        if let Some(max) = self.max {
            bounds.max = max;
            bounds.max_inclusive = true;
        }
        bounds
    }

    /// Option labels for choice fields
    pub fn options(&self) -> &'static [&'static str] {
        match self.kind {
            FieldKind::Choice(options) => options,
            _ => &[],
        }
    }
}

/// One reported result of a calculator.
#[derive(Debug, Clone, Serialize)]
pub struct ResultSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    /// Decimal places for display; 0 for piece counts
    pub precision: usize,
}

impl ResultSpec {
    pub fn new(key: &'static str, label: &'static str, unit: &'static str, precision: usize) -> Self {
        ResultSpec {
            key,
            label,
            unit,
            precision,
        }
    }

    /// A whole-piece count (`pcs`, no decimals)
    pub fn count(key: &'static str, label: &'static str) -> Self {
        ResultSpec::new(key, label, "pcs", 0)
    }
}

/// A worked example shown under the form.
#[derive(Debug, Clone, Serialize)]
pub struct UsageExample {
    pub title: &'static str,
    pub inputs: Values,
}

impl UsageExample {
    pub fn new(title: &'static str, inputs: impl Into<Values>) -> Self {
        UsageExample {
            title,
            inputs: inputs.into(),
        }
    }
}

// ============================================================================
// Calculator Definition
// ============================================================================

/// Everything a form needs to render one calculator.
#[derive(Debug, Clone, Serialize)]
pub struct CalculatorDefinition {
    pub id: CalculatorId,
    pub category: Category,
    pub title: &'static str,
    pub description: &'static str,
    pub inputs: Vec<FieldSpec>,
    pub results: Vec<ResultSpec>,
    pub examples: Vec<UsageExample>,
}

impl CalculatorDefinition {
    /// Look up an input spec by key
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.inputs.iter().find(|f| f.key == key)
    }

    /// Look up a result spec by key
    pub fn result(&self, key: &str) -> Option<&ResultSpec> {
        self.results.iter().find(|r| r.key == key)
    }

    /// Form prefill: every input at its default
    pub fn default_inputs(&self) -> Values {
        self.inputs.iter().map(|f| (f.key, f.default)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_bounds() {
        assert!(FieldKind::Length.bounds().contains(1000.0));
        assert!(!FieldKind::Length.bounds().contains(1000.1));
        assert!(FieldKind::Percentage.bounds().contains(0.0));
        assert!(!FieldKind::Percentage.bounds().contains(100.5));
        assert!(!FieldKind::Angle.bounds().contains(90.0));
        assert!(!FieldKind::Count.bounds().contains(0.0));
    }

    #[test]
    fn test_choice_bounds() {
        let kind = FieldKind::Choice(&["copper", "aluminium"]);
        assert!(kind.bounds().contains(0.0));
        assert!(kind.bounds().contains(1.0));
        assert!(!kind.bounds().contains(2.0));
        assert!(kind.is_integer());
    }

    #[test]
    fn test_field_overrides() {
        let field = FieldSpec::new("power_factor", "Power factor", "", FieldKind::Quantity, 0.95).max(1.0);
        assert!(field.bounds().contains(1.0));
        assert!(!field.bounds().contains(1.01));

        let drop = FieldSpec::new("max_voltage_drop", "Drop", "%", FieldKind::Percentage, 3.0).min(0.0);
        assert!(!drop.bounds().contains(0.0));
        assert!(drop.bounds().contains(0.5));
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            Bounds::positive_up_to(1000.0).describe(),
            "must be greater than 0 and at most 1000"
        );
    }
}
