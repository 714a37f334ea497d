//! JSON helpers for files under ~/.sidescroll/ (config and log).

use crate::core::config::{ConfigError, GameConfig};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "sidescroll.log";
const APP_DIR: &str = ".sidescroll";

/// Get the ~/.sidescroll/ directory path, creating it if needed.
pub fn app_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(APP_DIR);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.sidescroll/.
pub fn app_path(filename: &str) -> io::Result<PathBuf> {
    Ok(app_dir()?.join(filename))
}

/// Load a JSON file, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable JSON");
            T::default()
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => T::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read file, using defaults");
            T::default()
        }
    }
}

/// Save a value as pretty-printed JSON.
pub fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}

/// Resolve the startup configuration.
///
/// An explicitly named file must exist and parse. The default file in
/// ~/.sidescroll/ is optional and falls back to defaults when absent,
/// unreadable or malformed.
pub fn load_config(explicit: Option<&Path>) -> Result<GameConfig, ConfigError> {
    match explicit {
        Some(path) => GameConfig::load(path),
        None => Ok(default_config_in(dirs::home_dir().as_deref())),
    }
}

/// Read `<home>/.sidescroll/config.json` without creating anything.
fn default_config_in(home: Option<&Path>) -> GameConfig {
    match home {
        Some(home) => load_json_or_default(&home.join(APP_DIR).join(CONFIG_FILE)),
        None => {
            tracing::warn!("no home directory, using default config");
            GameConfig::default()
        }
    }
}
