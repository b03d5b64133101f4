//! # calc_cli
//!
//! Command-line front end for the construction calculators.
//!
//! ```text
//! calc_cli list --category concrete
//! calc_cli show wallpaper
//! calc_cli calc paint -i area=40 -i coats=2 -i coverage=10 -i can_volume=2.5 -i waste_percent=10
//! calc_cli calc cable_section --defaults -i conductor=aluminium --json
//! calc_cli history
//! calc_cli share <uuid>
//! ```

mod logger;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use calc_core::calculations::{CalculatorId, Category};
use calc_core::definitions::{CalculatorDefinition, FieldKind};
use calc_core::engine::CalculationOutcome;
use calc_core::file_io::{load_history, save_history, FileLock};
use calc_core::history::History;
use calc_core::settings::{Settings, DEFAULT_SETTINGS_FILE};
use calc_core::share::{self, format_value};
use calc_core::values::Values;
use calc_core::{catalog, engine};

const LOCK_OWNER: &str = "calc_cli";

#[derive(Parser)]
#[command(name = "calc_cli")]
#[command(about = "Construction material calculators", version)]
struct Args {
    /// Path to TOML settings file
    #[arg(short, long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,

    /// History file, overriding the settings file
    #[arg(long, global = true)]
    history: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List calculators, grouped by category
    List {
        #[arg(long)]
        category: Option<Category>,
    },
    /// Show the inputs, results and examples of a calculator
    Show { id: CalculatorId },
    /// Run a calculator
    Calc {
        id: CalculatorId,
        /// Input as key=value; choice fields also take the option name
        #[arg(short, long = "input", value_name = "KEY=VALUE")]
        inputs: Vec<String>,
        /// Start from the calculator's default inputs
        #[arg(long)]
        defaults: bool,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
        /// Do not record the calculation in history
        #[arg(long)]
        no_save: bool,
    },
    /// List stored calculations, newest first
    History {
        #[arg(long)]
        calculator: Option<CalculatorId>,
        #[arg(long)]
        json: bool,
    },
    /// Delete one stored calculation
    Delete { id: Uuid },
    /// Delete all stored calculations
    Clear,
    /// Print share text for a stored calculation
    Share { id: Uuid },
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let settings = Settings::load(&args.config)
        .with_context(|| format!("failed to load settings from {}", args.config.display()))?;
    let history_path = args.history.clone().unwrap_or_else(|| settings.history.path.clone());
    tracing::debug!(history = %history_path.display(), "settings resolved");

    match args.command {
        Command::List { category } => list(category),
        Command::Show { id } => show(catalog::definition(id)),
        Command::Calc {
            id,
            inputs,
            defaults,
            json,
            no_save,
        } => {
            let definition = catalog::definition(id);
            let mut raw = if defaults { definition.default_inputs() } else { Values::new() };
            for input in &inputs {
                let (key, value) = parse_input(definition, input)?;
                raw.insert(key, value);
            }
            let save_to = (!no_save).then_some((history_path.as_path(), &settings));
            return calc(&mut io::stdout().lock(), definition, raw, json, save_to);
        }
        Command::History { calculator, json } => {
            let history = load_history(&history_path)?;
            print_history(&history, calculator, json)?;
        }
        Command::Delete { id } => {
            let removed = update_history(&history_path, &settings, |history| history.remove(&id))?;
            if removed.is_none() {
                bail!("no stored calculation with id {}", id);
            }
            println!("Deleted {}", id);
        }
        Command::Clear => {
            let count = update_history(&history_path, &settings, |history| {
                let count = history.len();
                history.clear();
                count
            })?;
            println!("Deleted {} stored calculation(s)", count);
        }
        Command::Share { id } => {
            let history = load_history(&history_path)?;
            let entry = history
                .get(&id)
                .ok_or_else(|| anyhow!("no stored calculation with id {}", id))?;
            print!("{}", share::format_entry(entry, settings.display.show_inputs)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse `key=value`. Choice fields accept the option name as well as its index.
fn parse_input(definition: &CalculatorDefinition, input: &str) -> Result<(String, f64)> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| anyhow!("input '{}' is not in key=value form", input))?;
    let (key, value) = (key.trim(), value.trim());

    if let Some(FieldKind::Choice(options)) = definition.field(key).map(|field| &field.kind) {
        if let Some(index) = options.iter().position(|option| option.eq_ignore_ascii_case(value)) {
            return Ok((key.to_string(), index as f64));
        }
    }

    let number = value
        .parse::<f64>()
        .with_context(|| format!("value of '{}' is not a number: '{}'", key, value))?;
    Ok((key.to_string(), number))
}

fn list(category: Option<Category>) {
    let categories = match category {
        Some(category) => vec![category],
        None => catalog::categories(),
    };
    for category in categories {
        println!("{}", category.display_name());
        for definition in catalog::by_category(category) {
            println!("  {:<20} {}", definition.id, definition.title);
        }
    }
}

fn show(definition: &CalculatorDefinition) {
    println!("{} ({})", definition.title, definition.id);
    println!("{}", definition.description);

    println!("\nInputs:");
    for field in &definition.inputs {
        let range = match field.kind {
            FieldKind::Choice(options) => format!("one of {}", options.join(", ")),
            _ => field.bounds().describe().replacen("must be ", "", 1),
        };
        let optional = if field.optional { ", optional" } else { "" };
        println!(
            "  {:<22} {} [{}] default {}{} ({})",
            field.key,
            field.label,
            field.unit,
            format_value(field.default, 3),
            optional,
            range
        );
    }

    println!("\nResults:");
    for result in &definition.results {
        println!("  {:<22} {} [{}]", result.key, result.label, result.unit);
    }

    println!("\nExamples:");
    for example in &definition.examples {
        let inputs: Vec<String> = example
            .inputs
            .iter()
            .map(|(key, value)| format!("-i {}={}", key, format_value(value, 3)))
            .collect();
        println!("  {}\n    calc_cli calc {} {}", example.title, definition.id, inputs.join(" "));
    }
}

/// Run one calculation, print it, then record it.
///
/// The outcome is written to `out` before the history is touched.
fn calc(
    out: &mut impl Write,
    definition: &CalculatorDefinition,
    raw: Values,
    json: bool,
    save_to: Option<(&Path, &Settings)>,
) -> Result<ExitCode> {
    let (outcome, record) = match engine::calculate(definition.id, &raw) {
        Ok(results) => {
            let inputs = calc_core::validation::validate(definition, &raw)?;
            if !json {
                write!(out, "{}", share::format_calculation(definition, &inputs, &results))?;
            }
            let record = (inputs, results.clone());
            (CalculationOutcome::Success { results }, Some(record))
        }
        Err(error) => (CalculationOutcome::from(error), None),
    };

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&outcome)?)?;
    }
    out.flush()?;

    if let (Some((inputs, results)), Some((path, settings))) = (record, save_to) {
        let id = update_history(path, settings, |history| history.record(definition.id, inputs, results))
            .context("calculation succeeded but could not be saved to history")?;
        tracing::info!(%id, "calculation stored");
    }

    match outcome {
        CalculationOutcome::Success { .. } => Ok(ExitCode::SUCCESS),
        CalculationOutcome::ValidationError { field, message } => {
            if !json {
                eprintln!("invalid input '{}': {}", field, message);
            }
            Ok(ExitCode::FAILURE)
        }
        CalculationOutcome::Error { message } => {
            if !json {
                eprintln!("calculation failed: {}", message);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_history(history: &History, calculator: Option<CalculatorId>, json: bool) -> Result<()> {
    let entries: Vec<_> = match calculator {
        Some(id) => history.for_calculator(id).collect(),
        None => history.entries.iter().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        println!("No stored calculations");
    }
    for entry in entries {
        let definition = catalog::definition(entry.calculator_id);
        let headline = definition
            .results
            .first()
            .and_then(|spec| {
                entry.results.get(spec.key).map(|value| {
                    format!("{} {} {}", spec.label, format_value(value, spec.precision), spec.unit)
                })
            })
            .unwrap_or_default();
        println!(
            "{}  {}  {:<20} {}",
            entry.id,
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.calculator_id,
            headline.trim_end()
        );
    }
    Ok(())
}

/// Load, modify and save the history while holding its lock.
fn update_history<T>(path: &Path, settings: &Settings, change: impl FnOnce(&mut History) -> T) -> Result<T> {
    let _lock = FileLock::acquire(path, LOCK_OWNER)?;
    let mut history = load_history(path)?;
    history.set_max_entries(settings.history.max_entries);
    let out = change(&mut history);
    save_history(&history, path)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_input() {
        let definition = catalog::definition(CalculatorId::Paint);
        assert_eq!(parse_input(definition, "area=40").unwrap(), ("area".to_string(), 40.0));
        assert_eq!(parse_input(definition, " coats = 2 ").unwrap(), ("coats".to_string(), 2.0));
    }

    #[test]
    fn test_parse_choice_by_name() {
        let definition = catalog::definition(CalculatorId::CableSection);
        assert_eq!(
            parse_input(definition, "conductor=Aluminium").unwrap(),
            ("conductor".to_string(), 1.0)
        );
        assert_eq!(parse_input(definition, "phases=1").unwrap(), ("phases".to_string(), 1.0));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let definition = catalog::definition(CalculatorId::Paint);
        assert!(parse_input(definition, "area").is_err());
        assert!(parse_input(definition, "area=lots").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["calc_cli", "calc", "ohms-law", "-i", "voltage=12", "--no-save"]).unwrap();
        match args.command {
            Command::Calc { id, inputs, no_save, .. } => {
                assert_eq!(id, CalculatorId::OhmsLaw);
                assert_eq!(inputs, vec!["voltage=12".to_string()]);
                assert!(no_save);
            }
            _ => panic!("expected calc"),
        }
    }

    fn ohms_law_inputs() -> Values {
        Values::from([("voltage", 12.0), ("resistance", 6.0)])
    }

    #[test]
    fn test_calc_json_records_history() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        let settings = Settings::default();
        let definition = catalog::definition(CalculatorId::OhmsLaw);

        let mut out = Vec::new();
        let save_to = Some((path.as_path(), &settings));
        let code = calc(&mut out, definition, ohms_law_inputs(), true, save_to).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed["status"], "success");
        assert_eq!(printed["results"]["current"], 2.0);
        assert_eq!(load_history(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_calc_json_printed_when_save_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "").unwrap();
        let path = blocker.join("history.json");
        let settings = Settings::default();
        let definition = catalog::definition(CalculatorId::OhmsLaw);

        let mut out = Vec::new();
        let save_to = Some((path.as_path(), &settings));
        let result = calc(&mut out, definition, ohms_law_inputs(), true, save_to);
        assert!(result.is_err());

        let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed["status"], "success");
        assert_eq!(printed["results"]["power"], 24.0);
    }

    #[test]
    fn test_calc_validation_error_is_not_saved() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        let settings = Settings::default();
        let definition = catalog::definition(CalculatorId::OhmsLaw);

        let mut out = Vec::new();
        let raw = ohms_law_inputs().with("resistance", -1.0);
        let code = calc(&mut out, definition, raw, true, Some((path.as_path(), &settings))).unwrap();
        assert_eq!(code, ExitCode::FAILURE);

        let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed["status"], "validation_error");
        assert_eq!(printed["field"], "resistance");
        assert!(!path.exists());
    }
}
