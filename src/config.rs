//! Configuration: defaults, `.breadcrumb/config.yaml`, then environment.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BreadcrumbError, Result};
use crate::storage::STORAGE_KEY;

/// Directory marking a breadcrumb project root.
pub const BREADCRUMB_DIR: &str = ".breadcrumb";
const CONFIG_FILE: &str = "config.yaml";

pub const ENV_DATA_DIR: &str = "BREADCRUMB_DATA_DIR";
pub const ENV_EXPORT_DIR: &str = "BREADCRUMB_EXPORT_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where the decision file lives. Relative paths are resolved against
    /// the project root.
    pub data_dir: PathBuf,
    /// Storage key; also the data file's stem.
    pub storage_key: String,
    /// Default output directory for exports.
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(BREADCRUMB_DIR),
            storage_key: STORAGE_KEY.to_string(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load configuration for the project at `root`, applying environment
    /// overrides on top of the config file.
    pub fn load(root: &Path) -> Result<Self> {
        let mut config = Self::from_file_or_default(&config_path(root))?;
        config.apply_env(|name| env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        debug!(path = %path.display(), "loading config file");
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Apply `BREADCRUMB_*` overrides using `lookup` to read variables.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|s| !s.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(ENV_EXPORT_DIR).filter(|s| !s.is_empty()) {
            self.export_dir = PathBuf::from(dir);
        }
    }

    fn validate(&self) -> Result<()> {
        let key = &self.storage_key;
        if key.trim().is_empty() {
            return Err(BreadcrumbError::Config(
                "storage_key cannot be empty".to_string(),
            ));
        }
        if key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(BreadcrumbError::Config(format!(
                "storage_key '{}' must be a plain file name",
                key
            )));
        }
        Ok(())
    }

    /// Absolute data directory for the project at `root`.
    pub fn data_dir_in(&self, root: &Path) -> PathBuf {
        if self.data_dir.is_absolute() {
            self.data_dir.clone()
        } else {
            root.join(&self.data_dir)
        }
    }
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(BREADCRUMB_DIR).join(CONFIG_FILE)
}

/// Find the project root by walking up from `start` to the first directory
/// containing `.breadcrumb/` or `.git/`. Falls back to `start`.
pub fn find_project_root(start: &Path) -> PathBuf {
    let mut current = start;
    loop {
        if current.join(BREADCRUMB_DIR).exists() || current.join(".git").exists() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return start.to_path_buf(),
        }
    }
}
