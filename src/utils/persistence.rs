//! JSON persistence helpers for ~/.fillstat/ save files.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Get the ~/.fillstat/ directory path, creating it if needed.
pub fn fillstat_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".fillstat");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a save file in ~/.fillstat/.
pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(fillstat_dir()?.join(filename))
}

/// Load a JSON file from ~/.fillstat/. Missing or unreadable files yield `None`.
pub fn load_json<T: serde::de::DeserializeOwned>(filename: &str) -> Option<T> {
    let path = save_path(filename).ok()?;
    let json = fs::read_to_string(path).ok()?;
    serde_json::from_str(&json).ok()
}

/// Save a value as pretty-printed JSON to ~/.fillstat/.
pub fn save_json<T: serde::Serialize>(filename: &str, data: &T) -> io::Result<()> {
    let path = save_path(filename)?;
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}

/// Remove a save file; a missing file is not an error.
pub fn remove_json(filename: &str) -> io::Result<()> {
    match fs::remove_file(save_path(filename)?) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
