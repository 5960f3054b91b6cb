//! JSON file persistence for settings and the score ranking
//!
//! Loading never fails: a missing file is silent, an unreadable or corrupt one
//! is logged and replaced by defaults. Saving reports a `PersistError`.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Failure while writing a persisted file
#[derive(Debug)]
pub enum PersistError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "I/O error: {e}"),
            PersistError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io(e) => Some(e),
            PersistError::Json(e) => Some(e),
        }
    }
}

impl From<io::Error> for PersistError {
    fn from(e: io::Error) -> Self {
        PersistError::Io(e)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        PersistError::Json(e)
    }
}

/// Read `path` as JSON, falling back to `T::default()`
pub fn load_or_default<T>(path: &Path, what: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("No {what} at {}, using defaults", path.display());
            return T::default();
        }
        Err(e) => {
            log::warn!("Failed to read {what} from {}: {e}", path.display());
            return T::default();
        }
    };
    match serde_json::from_str(&json) {
        Ok(value) => {
            log::info!("Loaded {what} from {}", path.display());
            value
        }
        Err(e) => {
            log::warn!("Corrupt {what} at {}: {e}", path.display());
            T::default()
        }
    }
}

/// Write `value` to `path` as pretty JSON, creating parent directories
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
