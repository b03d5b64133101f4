//! # calc_core - Construction Material Calculation Engine
//!
//! `calc_core` estimates the materials a building job needs: wallpaper rolls,
//! tiles, bricks, concrete, rebar, roofing sheets, cable sizes and more. Every
//! calculator is a pure function from named inputs to named results, and all
//! inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Calculators take input and return results
//! - **Catalog-driven**: Each calculator declares its fields, ranges and
//!   results, so one validator and one form can serve all of them
//! - **Rich Errors**: Structured error types that name the offending field
//! - **Round up**: Piece counts never come out short
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::CalculatorId;
//! use calc_core::{catalog, engine};
//!
//! let definition = catalog::definition(CalculatorId::Tile);
//! let inputs = definition.default_inputs().with("area", 12.5);
//!
//! let results = engine::calculate(CalculatorId::Tile, &inputs).unwrap();
//! assert!(results.require("boxes").unwrap() >= 1.0);
//!
//! // Results serialize to a flat JSON object
//! let json = serde_json::to_string(&results).unwrap();
//! assert!(json.contains("\"tiles\""));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Calculator identifiers, categories and formula modules
//! - [`catalog`] - Static definitions of every calculator
//! - [`engine`] - Validate-and-dispatch entry point
//! - [`validation`] - Range checks on raw inputs
//! - [`history`] - Stored calculations
//! - [`file_io`] - History file with atomic saves and locking
//! - [`share`] - Plain-text summaries
//! - [`settings`] - TOML settings
//! - [`units`] - Type-safe unit wrappers and rounding
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod catalog;
pub mod definitions;
pub mod engine;
pub mod errors;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_io;
pub mod history;
pub mod settings;
pub mod share;
pub mod units;
pub mod validation;
pub mod values;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculatorId, Category};
pub use definitions::CalculatorDefinition;
pub use engine::{calculate, evaluate, CalculationOutcome};
pub use errors::{CalcError, CalcResult};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::{load_history, save_history, FileLock};
pub use history::{History, HistoryEntry};
pub use settings::Settings;
pub use values::Values;
