//! Settings file handling
//!
//! `config.yaml` lives in the platform config directory under
//! `bookstore-clerk/` (or wherever `BOOKSTORE_CONFIG` / `--config` points)
//! and holds the database location plus a few presentation defaults.
//! A missing default file simply means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, config_parse_failed, config_read_failed, io_error};
use crate::filter::Preset;

/// Application directory name under the platform config/data directories
const APP_DIR: &str = "bookstore-clerk";

/// Settings file name
pub const CONFIG_FILE: &str = "config.yaml";

/// Database file name used when nothing else is configured
pub const DATABASE_FILE: &str = "bookstore.db";

/// Clerk console settings (config.yaml)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClerkConfig {
    /// Database file location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Filter preset applied when a session starts
    pub default_preset: Preset,

    /// Rows shown per page in interactive lists
    pub page_size: usize,
}

impl Default for ClerkConfig {
    fn default() -> Self {
        Self {
            database: None,
            default_preset: Preset::Custom,
            page_size: 10,
        }
    }
}

impl ClerkConfig {
    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Serialize settings to a YAML string
    #[allow(dead_code)]
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Default location of config.yaml
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load settings
    ///
    /// An explicitly given file must exist; the default file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            if required {
                return Err(config_read_failed(
                    path.display().to_string(),
                    "file does not exist",
                ));
            }
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| config_read_failed(path.display().to_string(), e.to_string()))?;
        let config = Self::from_yaml(&content)
            .map_err(|e| config_parse_failed(path.display().to_string(), e.to_string()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Resolve the database path: flag or env first, then the file, then the data dir
    pub fn database_path(&self, flag: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = flag.or_else(|| self.database.clone()) {
            return Ok(path);
        }
        let base = dirs::data_dir()
            .ok_or_else(|| io_error("Could not determine data directory"))?;
        Ok(base.join(APP_DIR).join(DATABASE_FILE))
    }
}
