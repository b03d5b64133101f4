//! # History File I/O
//!
//! Reads and writes the calculation history with the same guarantees for
//! every front end:
//! - **Atomic saves**: write to `.tmp`, fsync, rename over the old file
//! - **File locking**: one writer at a time across processes
//! - **Version validation**: refuse files written by a newer schema
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::calculations::CalculatorId;
//! use calc_core::file_io::{load_history, save_history, FileLock};
//! use calc_core::values::Values;
//! use std::path::Path;
//!
//! let path = Path::new("history.json");
//!
//! // Hold the lock across read-modify-write
//! let lock = FileLock::acquire(path, "cli")?;
//! let mut history = load_history(path)?;
//! history.record(CalculatorId::OhmsLaw, Values::new(), Values::new());
//! save_history(&history, path)?;
//! drop(lock);
//! # Ok::<(), calc_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::history::{History, SCHEMA_VERSION};

/// Locks older than this are taken over
const STALE_LOCK_HOURS: i64 = 24;

/// Metadata written to the `.lock` file next to the history file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// Who took the lock (front end name or user)
    pub owner: String,
    pub machine: String,
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    pub fn new(owner: impl Into<String>) -> Self {
        LockInfo {
            owner: owner.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// Whether the holder is gone: same machine with a dead pid, or too old.
    pub fn is_stale(&self) -> bool {
        if hostname().is_some_and(|ours| ours == self.machine) && !process_alive(self.pid) {
            return true;
        }
        (Utc::now() - self.locked_at).num_hours() > STALE_LOCK_HOURS
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

#[cfg(target_os = "linux")]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{}", pid)).exists()
}

#[cfg(windows)]
fn process_alive(pid: u32) -> bool {
    use std::process::Command;
    Command::new("tasklist")
        .args(["/FI", &format!("PID eq {}", pid), "/NH"])
        .output()
        .map(|output| String::from_utf8_lossy(&output.stdout).contains(&pid.to_string()))
        .unwrap_or(true)
}

#[cfg(not(any(target_os = "linux", windows)))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// Exclusive lock on a history file, released on drop.
///
/// Combines an OS-level lock (fs2) with a `.lock` file that tells other
/// processes who holds it.
#[derive(Debug)]
pub struct FileLock {
    path: PathBuf,
    lock_path: PathBuf,
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire the lock for `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(FileLock)` - Lock acquired
    /// * `Err(CalcError::FileLocked)` - A live process holds the lock
    pub fn acquire(path: &Path, owner: impl Into<String>) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(owner);

        if let Some(existing) = FileLock::check(path) {
            return Err(CalcError::file_locked(
                path.display().to_string(),
                format!("{} ({}, pid {})", existing.owner, existing.machine, existing.pid),
                existing.locked_at.to_rfc3339(),
            ));
        }

        if let Some(parent) = lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                CalcError::file_error("create directory", parent.display().to_string(), e.to_string())
            })?;
        }

        // Not truncated until the OS lock is ours: a live holder's metadata stays intact
        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| {
                CalcError::file_error("create lock", lock_path.display().to_string(), e.to_string())
            })?;

        lock_file.try_lock_exclusive().map_err(|_| {
            CalcError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        lock_file.set_len(0).map_err(|e| {
            CalcError::file_error("reset lock", lock_path.display().to_string(), e.to_string())
        })?;

        let lock_json = serde_json::to_string_pretty(&info)?;
        lock_file.write_all(lock_json.as_bytes()).map_err(|e| {
            CalcError::file_error("write lock", lock_path.display().to_string(), e.to_string())
        })?;
        lock_file.sync_all().map_err(|e| {
            CalcError::file_error("sync lock", lock_path.display().to_string(), e.to_string())
        })?;

        tracing::debug!(path = %path.display(), "history lock acquired");

        Ok(FileLock {
            path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Current live holder of the lock, if any.
    pub fn check(path: &Path) -> Option<LockInfo> {
        read_lock_info(&lock_path_for(path))
            .ok()
            .filter(|info| !info.is_stale())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

fn lock_path_for(path: &Path) -> PathBuf {
    with_suffix(path, "lock")
}

/// `history.json` → `history.json.<suffix>`
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

fn read_lock_info(lock_path: &Path) -> CalcResult<LockInfo> {
    let contents = fs::read_to_string(lock_path).map_err(|e| {
        CalcError::file_error("read lock", lock_path.display().to_string(), e.to_string())
    })?;
    Ok(serde_json::from_str(&contents)?)
}

/// Save the history with atomic write semantics.
///
/// 1. Serialize to pretty JSON
/// 2. Write to `<file>.tmp` and fsync
/// 3. Rename over the target
///
/// Parent directories are created as needed.
pub fn save_history(history: &History, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(history)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            CalcError::file_error("create directory", parent.display().to_string(), e.to_string())
        })?;
    }

    let tmp_path = with_suffix(path, "tmp");
    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::info!(path = %path.display(), entries = history.len(), "history saved");
    Ok(())
}

/// Load the history file.
///
/// # Returns
///
/// * `Ok(History)` - Loaded history, or an empty one if the file does not exist
/// * `Err(CalcError::VersionMismatch)` - Written by an incompatible schema
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - Any other I/O error
pub fn load_history(path: &Path) -> CalcResult<History> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no history file, starting empty");
            return Ok(History::new());
        }
        Err(e) => {
            return Err(CalcError::file_error("open", path.display().to_string(), e.to_string()))
        }
    };

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let history: History = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    validate_version(&history.version)?;

    tracing::info!(path = %path.display(), entries = history.len(), "history loaded");
    Ok(history)
}

/// Check a file's schema version against [`SCHEMA_VERSION`].
///
/// Major versions must match. While the major version is 0, a file with a
/// newer minor version is rejected as well.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    match (file_parts.as_slice(), current_parts.as_slice()) {
        ([file_major, ..], [current_major, ..]) if file_major != current_major => Err(mismatch()),
        ([0, file_minor, ..], [0, current_minor, ..]) if file_minor > current_minor => Err(mismatch()),
        ([_, ..], [_, ..]) => Ok(()),
        _ => Err(mismatch()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::CalculatorId;
    use crate::values::Values;
    use tempfile::TempDir;

    fn sample_history() -> History {
        let mut history = History::new();
        history.record(
            CalculatorId::OhmsLaw,
            Values::from([("voltage", 230.0), ("resistance", 46.0)]),
            Values::from([("current", 5.0), ("power", 1150.0)]),
        );
        history
    }

    #[test]
    fn test_lock_path_generation() {
        let lock_path = lock_path_for(Path::new("/path/to/history.json"));
        assert_eq!(lock_path, Path::new("/path/to/history.json.lock"));
    }

    #[test]
    fn test_lock_info_creation() {
        let info = LockInfo::new("calc_cli");
        assert_eq!(info.owner, "calc_cli");
        assert!(info.pid > 0);
        assert!(!info.is_stale());
    }

    #[test]
    fn test_old_lock_is_stale() {
        let mut info = LockInfo::new("calc_cli");
        info.machine = "elsewhere".to_string();
        info.locked_at = Utc::now() - chrono::Duration::hours(STALE_LOCK_HOURS + 1);
        assert!(info.is_stale());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        let history = sample_history();
        save_history(&history, &path).unwrap();

        let loaded = load_history(&path).unwrap();
        assert_eq!(loaded.entries, history.entries);
        assert_eq!(loaded.version, SCHEMA_VERSION);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let history = load_history(&dir.path().join("absent.json")).unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("history.json");
        save_history(&sample_history(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        save_history(&sample_history(), &path).unwrap();

        assert!(!with_suffix(&path, "tmp").exists());
        assert!(path.exists());
    }

    #[test]
    fn test_invalid_json_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_history(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_newer_schema_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        let mut history = sample_history();
        history.version = "0.2.0".to_string();
        save_history(&history, &path).unwrap();

        let err = load_history(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");
    }

    #[test]
    fn test_file_lock_acquire_and_release() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        let lock = FileLock::acquire(&path, "calc_cli").unwrap();
        assert_eq!(lock.info.owner, "calc_cli");
        assert_eq!(lock.path(), path.as_path());

        let lock_path = lock_path_for(&path);
        assert!(lock_path.exists());
        assert!(FileLock::check(&path).is_some());

        drop(lock);

        assert!(!lock_path.exists());
        assert!(FileLock::check(&path).is_none());
    }

    #[test]
    fn test_second_acquire_is_refused() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        let _held = FileLock::acquire(&path, "first").unwrap();
        let err = FileLock::acquire(&path, "second").unwrap_err();
        assert_eq!(err.error_code(), "FILE_LOCKED");
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("first"));
    }

    #[test]
    fn test_old_lock_is_taken_over() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        let mut abandoned = LockInfo::new("crashed");
        abandoned.machine = "elsewhere".to_string();
        abandoned.locked_at = Utc::now() - chrono::Duration::hours(STALE_LOCK_HOURS + 1);
        fs::write(lock_path_for(&path), serde_json::to_string(&abandoned).unwrap()).unwrap();
        assert!(FileLock::check(&path).is_none());

        let lock = FileLock::acquire(&path, "calc_cli").unwrap();
        assert_eq!(lock.info.owner, "calc_cli");
        let on_disk = read_lock_info(&lock_path_for(&path)).unwrap();
        assert_eq!(on_disk.owner, "calc_cli");
        assert_eq!(on_disk.pid, std::process::id());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_dead_holder_lock_is_taken_over() {
        // Liveness is only checked for locks taken on this machine
        let Some(machine) = hostname() else {
            return;
        };
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        let mut orphan = LockInfo::new("crashed");
        orphan.machine = machine;
        orphan.pid = u32::MAX;
        fs::write(lock_path_for(&path), serde_json::to_string(&orphan).unwrap()).unwrap();

        let lock = FileLock::acquire(&path, "calc_cli").unwrap();
        assert_eq!(read_lock_info(&lock_path_for(&path)).unwrap().owner, lock.info.owner);
    }

    #[test]
    fn test_refused_acquire_keeps_holder_metadata() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        let lock_path = lock_path_for(&path);

        let _held = FileLock::acquire(&path, "holder").unwrap();

        // Metadata that looks abandoned while the OS lock is still held
        let mut aged = LockInfo::new("holder");
        aged.machine = "elsewhere".to_string();
        aged.locked_at = Utc::now() - chrono::Duration::hours(STALE_LOCK_HOURS + 1);
        let aged_json = serde_json::to_string(&aged).unwrap();
        fs::write(&lock_path, &aged_json).unwrap();

        let err = FileLock::acquire(&path, "intruder").unwrap_err();
        assert_eq!(err.error_code(), "FILE_LOCKED");
        assert_eq!(fs::read_to_string(&lock_path).unwrap(), aged_json);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
