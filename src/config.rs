//! Configuration loading
//!
//! Defaults come from [`crate::constants`], then `~/.bfhl/config.yaml` if it
//! exists, then `BFHL_*` environment variables.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_ENDPOINT_URL, DEFAULT_LOG_FILE, DEFAULT_TIMEOUT_SECS,
};
use crate::models::Field;

pub const ENV_ENDPOINT: &str = "BFHL_ENDPOINT";
pub const ENV_TIMEOUT_SECS: &str = "BFHL_TIMEOUT_SECS";
pub const ENV_LOG_FILE: &str = "BFHL_LOG_FILE";

/// Runtime configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL the payload is POSTed to
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Where tracing output goes
    pub log_file: PathBuf,
    /// Fields ticked when the app starts
    pub default_fields: Vec<Field>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: String::from(DEFAULT_ENDPOINT_URL),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            default_fields: Vec::new(),
        }
    }
}

impl Config {
    /// Load from the default file location and the process environment
    pub fn load() -> Result<Self> {
        let mut config = match default_path() {
            Some(path) if path.is_file() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Read a YAML config file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Apply `BFHL_*` overrides using the given lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            self.endpoint = endpoint;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds, got {:?}", ENV_TIMEOUT_SECS, raw))?;
        }
        if let Some(log_file) = lookup(ENV_LOG_FILE) {
            self.log_file = PathBuf::from(log_file);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Directory and file name of the log, for `tracing_appender`
    pub fn log_location(&self) -> (PathBuf, PathBuf) {
        let dir = self
            .log_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let file = self
            .log_file
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
        (dir, file)
    }
}

/// `~/.bfhl/config.yaml`, if a home directory is known
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
