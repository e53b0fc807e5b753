//! File-backed library settings.
//!
//! A small `settings.json` supplies the host-tunable knobs: the default
//! dictionary URL and the engine's batch size. Missing or corrupt files fall
//! back to defaults, never to an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::engine::DEFAULT_BATCH_SIZE;

pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const CONFIG_DIR_NAME: &str = "wordswap";

/// Library configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Tokens processed per scheduler turn
    pub batch_size: usize,
    /// URL of the default dictionary source, if any
    pub dictionary_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            dictionary_url: None,
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults
    ///
    /// Absence is the common case and logs at debug; a file that exists but
    /// fails to parse logs a warning. Neither is an error to the caller.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            crate::debug!("No settings file at {:?}, using defaults", path);
            return Self::default();
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                crate::warn!("Failed to read settings {:?}: {}, using defaults", path, e);
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                crate::warn!("Failed to parse settings {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Load settings from the platform config dir
    /// ({config_dir}/wordswap/settings.json)
    pub fn load_default() -> Self {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => {
                crate::warn!("Config directory not found, using default settings");
                Self::default()
            }
        }
    }

    /// Default settings file location, if the platform exposes a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(SETTINGS_FILE_NAME))
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
