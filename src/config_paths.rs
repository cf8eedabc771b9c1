//! Where dockspace keeps its files
//!
//! Everything lives under one directory:
//! - Unix/macOS: `$XDG_CONFIG_HOME/dockspace/` or `~/.config/dockspace/`
//! - Windows: `%APPDATA%\dockspace\`
//!
//! ```text
//! dockspace/
//! ├── config.yaml
//! ├── layouts/          relative `default_layout` paths resolve here
//! └── logs/             dockspace.log.YYYY-MM-DD
//! ```

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "dockspace";

/// Prefix of the daily-rotated log files
pub const LOG_FILE: &str = "dockspace.log";

pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var_os("APPDATA").map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|base| base.join(APP_DIR))
    }
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

pub fn layouts_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("layouts"))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Log file currently being written, or where the first one will go
pub fn log_file() -> Option<PathBuf> {
    let dir = logs_dir()?;
    Some(latest_log_in(&dir).unwrap_or_else(|| dir.join(LOG_FILE)))
}

/// Newest `dockspace.log.*` in `dir`. Date suffixes sort lexically.
pub fn latest_log_in(dir: &Path) -> Option<PathBuf> {
    fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(LOG_FILE))
        })
        .max()
}

/// Create the logs directory if needed and return it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let dir = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    fs::create_dir_all(&dir)
        .map_err(|e| format!("Failed to create directory {}: {}", dir.display(), e))?;
    Ok(dir)
}
