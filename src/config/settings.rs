//! User settings.
//!
//! Settings come from a JSON file: an explicit path if one is given,
//! otherwise `settings.json` in the platform configuration directory
//! (`~/.config/portprobe` on Linux). A missing default file means defaults.

use crate::error::{ConfigError, ConfigResult};
use crate::scanner::DEFAULT_WORKERS;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Port specification used when none is given.
pub const DEFAULT_PORTS: &str = "top100";

/// Application settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Port specification used when `--ports` is absent.
    pub default_ports: String,
    /// Worker count used when `--threads` is absent.
    pub default_threads: usize,
    /// Colored console output.
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_ports: DEFAULT_PORTS.to_string(),
            default_threads: DEFAULT_WORKERS,
            color: true,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from the default location when `None`.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load_default(),
        }
    }

    /// Load settings from the default location, if the file exists.
    pub fn load_default() -> ConfigResult<Self> {
        let file = default_settings_file()?;
        if !file.exists() {
            debug!(path = %file.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }
}

/// Path of the settings file in the platform configuration directory.
pub fn default_settings_file() -> ConfigResult<PathBuf> {
    let project =
        ProjectDirs::from("com", "portprobe", "portprobe").ok_or(ConfigError::DirectoryNotFound)?;
    Ok(project.config_dir().join("settings.json"))
}
