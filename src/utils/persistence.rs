use std::{fs, path::Path};

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::WizardError;

/// Creates `dir` (and parents) when missing.
pub fn ensure_dir(dir: &Path) -> Result<(), WizardError> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Writes `value` as pretty JSON atomically by staging to a temporary file.
pub fn save_json_atomic<T: Serialize>(value: &T, path: &Path) -> Result<(), WizardError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(value)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Loads a JSON document from disk, returning structured errors on failure.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, WizardError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
