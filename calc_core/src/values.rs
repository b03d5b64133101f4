//! # Named Numeric Values
//!
//! Every calculator reads a flat map of named numbers and produces another.
//! [`Values`] is that map. It is ordered (`BTreeMap`) so JSON output and
//! share text are deterministic.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::values::Values;
//!
//! let inputs = Values::new()
//!     .with("area", 20.0)
//!     .with("coats", 2.0);
//!
//! assert_eq!(inputs.require("area").unwrap(), 20.0);
//! assert_eq!(inputs.count("coats").unwrap(), 2);
//! assert!(inputs.require("coverage").is_err());
//!
//! let json = serde_json::to_string(&inputs).unwrap();
//! assert_eq!(json, r#"{"area":20.0,"coats":2.0}"#);
//! ```

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Ordered map from field key to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Values(BTreeMap<String, f64>);

impl Values {
    /// Create an empty map
    pub fn new() -> Self {
        Values(BTreeMap::new())
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Insert or replace a value, returning the previous one
    pub fn insert(&mut self, key: impl Into<String>, value: f64) -> Option<f64> {
        self.0.insert(key.into(), value)
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Get a value, failing with `MissingField` when absent.
    pub fn require(&self, key: &str) -> CalcResult<f64> {
        self.get(key).ok_or_else(|| CalcError::missing_field(key))
    }

    /// Get a value that must be a whole, non-negative number.
    pub fn count(&self, key: &str) -> CalcResult<u32> {
        let value = self.require(key)?;
        if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
            return Err(CalcError::invalid_input(
                key,
                value.to_string(),
                "must be a whole non-negative number",
            ));
        }
        Ok(value as u32)
    }

    /// Whether the map holds this key
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterate over keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate over `(key, value)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no values are present
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flatten a serializable struct of numeric fields into a map.
    ///
    /// Integer fields (piece counts) become whole `f64`s. Any non-numeric
    /// field is an internal error: calculator inputs and results are numbers only.
    pub fn from_serializable<T: Serialize>(value: &T) -> CalcResult<Self> {
        let json = serde_json::to_value(value)?;
        let object = match json {
            serde_json::Value::Object(object) => object,
            other => {
                return Err(CalcError::internal(format!(
                    "expected a struct of numeric fields, got {}",
                    other
                )))
            }
        };

        let mut values = Values::new();
        for (key, field) in object {
            let number = field.as_f64().ok_or_else(|| {
                CalcError::internal(format!("field '{}' is not numeric: {}", key, field))
            })?;
            values.insert(key, number);
        }
        Ok(values)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Values(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<const N: usize> From<[(&str, f64); N]> for Values {
    fn from(pairs: [(&str, f64); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl IntoIterator for Values {
    type Item = (String, f64);
    type IntoIter = btree_map::IntoIter<String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        area: f64,
        rolls: u64,
    }

    #[test]
    fn test_require_and_missing() {
        let values = Values::from([("area", 12.5)]);
        assert_eq!(values.require("area").unwrap(), 12.5);
        assert_eq!(
            values.require("height").unwrap_err(),
            CalcError::missing_field("height")
        );
    }

    #[test]
    fn test_count_rejects_fractions_and_negatives() {
        let values = Values::from([("a", 3.0), ("b", 2.5), ("c", -1.0)]);
        assert_eq!(values.count("a").unwrap(), 3);
        assert!(values.count("b").is_err());
        assert!(values.count("c").is_err());
    }

    #[test]
    fn test_from_serializable() {
        let values = Values::from_serializable(&Sample { area: 30.0, rolls: 6 }).unwrap();
        assert_eq!(values.get("area"), Some(30.0));
        assert_eq!(values.get("rolls"), Some(6.0));
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_from_serializable_rejects_non_numeric() {
        #[derive(Serialize)]
        struct Labelled {
            label: String,
        }
        let err = Values::from_serializable(&Labelled { label: "x".into() }).unwrap_err();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_ordered_iteration() {
        let values = Values::new().with("zeta", 1.0).with("alpha", 2.0);
        let keys: Vec<_> = values.keys().collect();
        assert_eq!(keys, vec!["alpha", "zeta"]);
    }
}
