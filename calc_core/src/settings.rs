//! # Settings
//!
//! User settings read from a TOML file. Every key is optional; a missing
//! file gives the defaults.
//!
//! ```toml
//! [history]
//! path = "calc_history.json"
//! max_entries = 100
//!
//! [display]
//! show_inputs = true
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::history::DEFAULT_MAX_ENTRIES;

/// Default settings file name
pub const DEFAULT_SETTINGS_FILE: &str = "buildcalc.toml";

/// Default history file name
pub const DEFAULT_HISTORY_FILE: &str = "calc_history.json";

/// Largest history limit accepted
pub const MAX_HISTORY_ENTRIES: usize = 10_000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub history: HistorySettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// History file location
    pub path: PathBuf,
    /// Entries kept before the oldest are dropped
    pub max_entries: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        HistorySettings {
            path: PathBuf::from(DEFAULT_HISTORY_FILE),
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Include the inputs in share text
    pub show_inputs: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings { show_inputs: true }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults if it does not exist.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Settings::default());
            }
            Err(e) => {
                return Err(CalcError::file_error("read settings", path.display().to_string(), e.to_string()))
            }
        };

        let settings: Settings = toml::from_str(&contents)
            .map_err(|e| CalcError::config(format!("{}: {}", path.display(), e)))?;
        settings.validate()?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml(contents: &str) -> CalcResult<Self> {
        let settings: Settings = toml::from_str(contents).map_err(|e| CalcError::config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml(&self) -> CalcResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.history.max_entries == 0 || self.history.max_entries > MAX_HISTORY_ENTRIES {
            return Err(CalcError::config(format!(
                "history.max_entries must be between 1 and {}, got {}",
                MAX_HISTORY_ENTRIES, self.history.max_entries
            )));
        }
        if self.history.path.as_os_str().is_empty() {
            return Err(CalcError::config("history.path must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.history.max_entries, 100);
        assert!(settings.display.show_inputs);
    }

    #[test]
    fn test_partial_file() {
        let settings = Settings::from_toml("[history]\nmax_entries = 20\n").unwrap();
        assert_eq!(settings.history.max_entries, 20);
        assert_eq!(settings.history.path, PathBuf::from(DEFAULT_HISTORY_FILE));
        assert!(settings.display.show_inputs);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("buildcalc.toml");
        fs::write(
            &path,
            "[history]\npath = \"/tmp/calcs.json\"\n\n[display]\nshow_inputs = false\n",
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.history.path, PathBuf::from("/tmp/calcs.json"));
        assert!(!settings.display.show_inputs);
    }

    #[test]
    fn test_parse_error_is_config_error() {
        let err = Settings::from_toml("[history\nmax_entries = ").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_zero_max_entries_rejected() {
        let err = Settings::from_toml("[history]\nmax_entries = 0\n").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_toml_roundtrip() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        assert_eq!(Settings::from_toml(&text).unwrap(), settings);
    }
}
