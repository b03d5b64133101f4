//! # Calculator Catalog
//!
//! Read-only registry of every [`CalculatorDefinition`], built once on first
//! use. This is the repository the form layer browses: by category, by id
//! or by free-text search.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{CalculatorId, Category};
//! use calc_core::catalog;
//!
//! let wallpaper = catalog::definition(CalculatorId::Wallpaper);
//! assert_eq!(wallpaper.category, Category::Finishing);
//!
//! let electrical = catalog::by_category(Category::Electrical);
//! assert!(electrical.iter().any(|d| d.id == CalculatorId::CableSection));
//! ```

use once_cell::sync::Lazy;

use crate::calculations::{CalculatorId, Category};
use crate::definitions::CalculatorDefinition;
use crate::errors::CalcResult;

static CATALOG: Lazy<Vec<CalculatorDefinition>> = Lazy::new(|| {
    CalculatorId::ALL
        .iter()
        .map(CalculatorId::build_definition)
        .collect()
});

/// All definitions in catalog order
pub fn all() -> &'static [CalculatorDefinition] {
    &CATALOG
}

/// Definition for a known id
pub fn definition(id: CalculatorId) -> &'static CalculatorDefinition {
    &CATALOG[id.index()]
}

/// Definition for an id string, e.g. `"cable_section"`
pub fn get(id: &str) -> CalcResult<&'static CalculatorDefinition> {
    let id: CalculatorId = id.parse()?;
    Ok(definition(id))
}

/// Definitions in one category, in catalog order
pub fn by_category(category: Category) -> Vec<&'static CalculatorDefinition> {
    CATALOG.iter().filter(|d| d.category == category).collect()
}

/// Categories that hold at least one calculator, in display order
pub fn categories() -> Vec<Category> {
    let mut categories: Vec<Category> = Category::ALL
        .into_iter()
        .filter(|c| CATALOG.iter().any(|d| d.category == *c))
        .collect();
    categories.sort_by_key(Category::sort_order);
    categories
}

/// Case-insensitive search over id, title and description.
///
/// An empty query matches everything.
pub fn search(query: &str) -> Vec<&'static CalculatorDefinition> {
    let needle = query.trim().to_lowercase();
    CATALOG
        .iter()
        .filter(|d| {
            needle.is_empty()
                || d.id.as_str().contains(&needle)
                || d.title.to_lowercase().contains(&needle)
                || d.description.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::engine;
    use crate::validation::validate_field;

    #[test]
    fn test_catalog_order_matches_ids() {
        assert_eq!(all().len(), CalculatorId::ALL.len());
        for (definition, id) in all().iter().zip(CalculatorId::ALL) {
            assert_eq!(definition.id, id);
        }
    }

    #[test]
    fn test_every_definition_is_complete() {
        for definition in all() {
            assert!(!definition.title.is_empty(), "{} has no title", definition.id);
            assert!(!definition.inputs.is_empty(), "{} has no inputs", definition.id);
            assert!(!definition.results.is_empty(), "{} has no results", definition.id);
            assert!(!definition.examples.is_empty(), "{} has no examples", definition.id);

            let keys: HashSet<_> = definition.inputs.iter().map(|f| f.key).collect();
            assert_eq!(keys.len(), definition.inputs.len(), "{} repeats an input key", definition.id);
        }
    }

    #[test]
    fn test_defaults_pass_validation() {
        for definition in all() {
            for field in &definition.inputs {
                assert!(
                    validate_field(field, field.default).is_ok(),
                    "{}.{} default {} is out of range",
                    definition.id,
                    field.key,
                    field.default
                );
            }
        }
    }

    #[test]
    fn test_defaults_compute() {
        for definition in all() {
            let results = engine::calculate(definition.id, &definition.default_inputs())
                .unwrap_or_else(|e| panic!("{} defaults failed: {}", definition.id, e));
            assert!(!results.is_empty());
        }
    }

    #[test]
    fn test_examples_compute_and_match_declared_results() {
        for definition in all() {
            let declared: HashSet<_> = definition.results.iter().map(|r| r.key).collect();
            for example in &definition.examples {
                let results = engine::calculate(definition.id, &example.inputs).unwrap_or_else(|e| {
                    panic!("{} example '{}' failed: {}", definition.id, example.title, e)
                });
                let produced: HashSet<_> = results.keys().collect();
                assert_eq!(produced, declared, "{} result keys drifted", definition.id);
                assert!(
                    results.iter().all(|(_, v)| v.is_finite()),
                    "{} produced a non-finite result",
                    definition.id
                );
            }
        }
    }

    #[test]
    fn test_categories_cover_everything() {
        let categories = categories();
        assert_eq!(categories.len(), Category::ALL.len());
        let total: usize = categories.iter().map(|c| by_category(*c).len()).sum();
        assert_eq!(total, all().len());
    }

    #[test]
    fn test_search() {
        assert!(search("WALLPAPER").iter().any(|d| d.id == CalculatorId::Wallpaper));
        assert!(search("darcy").iter().any(|d| d.id == CalculatorId::PipePressureLoss));
        assert_eq!(search("").len(), all().len());
        assert!(search("no such calculator here").is_empty());
    }

    #[test]
    fn test_get_by_string() {
        assert_eq!(get("ohms_law").unwrap().id, CalculatorId::OhmsLaw);
        assert!(get("stairs").is_err());
    }
}
