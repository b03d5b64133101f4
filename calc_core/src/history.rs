//! # Calculation History
//!
//! Every completed calculation can be recorded as a [`HistoryEntry`]. The
//! [`History`] container is what gets written to the history file.
//!
//! ## Structure
//!
//! ```text
//! History
//! ├── version: schema version of the file
//! ├── max_entries: oldest entries are dropped beyond this
//! └── entries: Vec<HistoryEntry>, newest first
//! ```
//!
//! Entries are created and deleted, never edited.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::CalculatorId;
//! use calc_core::history::History;
//! use calc_core::values::Values;
//!
//! let mut history = History::new();
//! let id = history.record(
//!     CalculatorId::OhmsLaw,
//!     Values::from([("voltage", 230.0), ("resistance", 46.0)]),
//!     Values::from([("current", 5.0), ("power", 1150.0)]),
//! );
//! assert_eq!(history.get(&id).unwrap().calculator_id, CalculatorId::OhmsLaw);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::CalculatorId;
use crate::values::Values;

/// Current schema version for history files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Entries kept when no limit is configured
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// One stored calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub calculator_id: CalculatorId,
    pub timestamp: DateTime<Utc>,
    /// Normalized inputs, optional defaults included
    pub inputs: Values,
    pub results: Values,
}

impl HistoryEntry {
    pub fn new(calculator_id: CalculatorId, inputs: Values, results: Values) -> Self {
        HistoryEntry {
            id: Uuid::new_v4(),
            calculator_id,
            timestamp: Utc::now(),
            inputs,
            results,
        }
    }
}

/// Stored calculations, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub max_entries: usize,

    pub entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        History::with_capacity(DEFAULT_MAX_ENTRIES)
    }

    /// Empty history holding at most `max_entries` entries.
    pub fn with_capacity(max_entries: usize) -> Self {
        History {
            version: SCHEMA_VERSION.to_string(),
            max_entries,
            entries: Vec::new(),
        }
    }

    /// Store a calculation and return the id assigned to it.
    ///
    /// Entries beyond `max_entries` are dropped from the old end.
    pub fn record(&mut self, calculator_id: CalculatorId, inputs: Values, results: Values) -> Uuid {
        self.push(HistoryEntry::new(calculator_id, inputs, results))
    }

    /// Store an already built entry as the newest one.
    pub fn push(&mut self, entry: HistoryEntry) -> Uuid {
        let id = entry.id;
        self.entries.insert(0, entry);
        self.enforce_limit();
        tracing::debug!(%id, entries = self.entries.len(), "history entry recorded");
        id
    }

    /// Change the limit, dropping the oldest entries if needed.
    pub fn set_max_entries(&mut self, max_entries: usize) {
        self.max_entries = max_entries;
        self.enforce_limit();
    }

    fn enforce_limit(&mut self) {
        if self.entries.len() > self.max_entries {
            let dropped = self.entries.len() - self.max_entries;
            self.entries.truncate(self.max_entries);
            tracing::debug!(dropped, "oldest history entries dropped");
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == *id)
    }

    /// Remove an entry by id, returning it if it existed.
    pub fn remove(&mut self, id: &Uuid) -> Option<HistoryEntry> {
        let index = self.entries.iter().position(|entry| entry.id == *id)?;
        Some(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries of one calculator, newest first.
    pub fn for_calculator(&self, calculator_id: CalculatorId) -> impl Iterator<Item = &HistoryEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.calculator_id == calculator_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        History::new()
    }
}
