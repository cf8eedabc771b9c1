//! Engine configuration persistence
//!
//! Stores user preferences in `~/.config/dockspace/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Settings that persist across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Thickness of splitter hit areas, absolute units
    #[serde(default = "default_splitter_width")]
    pub splitter_width: f64,

    /// Thickness of float edge and corner grips, absolute units
    #[serde(default = "default_float_grip")]
    pub float_grip: f64,

    /// Height of the float title drag area, absolute units
    #[serde(default = "default_float_title_height")]
    pub float_title_height: f64,

    /// Minimum time between dispatched pointer moves (0 = every move)
    #[serde(default)]
    pub pointer_move_interval_ms: u64,

    /// Layout used when none is given on the command line.
    /// Relative paths are resolved against `~/.config/dockspace/layouts/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_layout: Option<PathBuf>,
}

fn default_splitter_width() -> f64 {
    crate::view::SPLITTER_WIDTH
}

fn default_float_grip() -> f64 {
    6.0
}

fn default_float_title_height() -> f64 {
    24.0
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            splitter_width: default_splitter_width(),
            float_grip: default_float_grip(),
            float_title_height: default_float_title_height(),
            pointer_move_interval_ms: 0,
            default_layout: None,
        }
    }
}

impl EngineConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Absolute path of the configured default layout, if any
    pub fn default_layout_path(&self) -> Option<PathBuf> {
        let path = self.default_layout.as_ref()?;
        if path.is_absolute() {
            Some(path.clone())
        } else {
            crate::config_paths::layouts_dir().map(|dir| dir.join(path))
        }
    }
}
