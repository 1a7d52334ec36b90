//! Configuration loading and management
//!
//! Handles parsing of the optional `config.toml` in the user's config
//! directory, and resolution of the data directory.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::lock::DEFAULT_LOCK_TIMEOUT_MS;

/// Name of the config file inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where and how data files are stored
    #[serde(default)]
    pub storage: StorageConfig,

    /// Glyphs used when listing items
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory; defaults to the platform data dir
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// How long to wait for another invocation to release the data lock
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

fn default_lock_timeout_ms() -> u64 {
    DEFAULT_LOCK_TIMEOUT_MS
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_checked_glyph")]
    pub checked: String,

    #[serde(default = "default_unchecked_glyph")]
    pub unchecked: String,
}

fn default_checked_glyph() -> String {
    "✔".to_string()
}

fn default_unchecked_glyph() -> String {
    "✘".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            checked: default_checked_glyph(),
            unchecked: default_unchecked_glyph(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "checklist")
}

/// Default location of the config file, if the platform has a home directory
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Default data directory, if the platform has a home directory
pub fn default_data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`, or return defaults when it does not exist.
    ///
    /// A file that exists but fails to parse or validate is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Resolve the data directory.
    ///
    /// Precedence: explicit override (`--dir` / `CHECKLIST_DIR`), then
    /// `storage.dir`, then the platform data directory.
    pub fn data_dir(&self, override_dir: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = override_dir {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = &self.storage.dir {
            return Ok(dir.clone());
        }
        default_data_dir().ok_or_else(|| {
            Error::InvalidConfig(
                "no home directory found; set storage.dir or pass --dir".to_string(),
            )
        })
    }

    fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.storage.dir {
            if dir.as_os_str().is_empty() {
                return Err(Error::InvalidConfig(
                    "storage.dir cannot be empty".to_string(),
                ));
            }
        }
        if self.storage.lock_timeout_ms == 0 {
            return Err(Error::InvalidConfig(
                "storage.lock_timeout_ms must be > 0".to_string(),
            ));
        }
        if self.display.checked.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "display.checked cannot be empty".to_string(),
            ));
        }
        if self.display.unchecked.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "display.unchecked cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
