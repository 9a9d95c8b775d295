//! Generic JSON persistence helpers for the local cache.
//!
//! Every persisted aggregate lives as plain JSON under
//! `~/.voidstorm/<device-id>/`, keyed by the per-device identifier the
//! identity collaborator supplies. A malformed file is replaced with the
//! default value, never surfaced as an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the `~/.voidstorm/<device-id>/` directory, creating it if needed.
pub fn data_dir(device_id: &str) -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".voidstorm").join(device_id);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Load a JSON file, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

/// Load a JSON file, returning `None` if missing or invalid.
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Option<T> {
    let json = fs::read_to_string(path).ok()?;
    serde_json::from_str(&json).ok()
}

/// Save a value as pretty-printed JSON, creating parent directories.
pub fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}
