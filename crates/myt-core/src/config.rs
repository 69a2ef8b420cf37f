//! Configuration management for myt-tools.
//!
//! A single TOML file, looked up in the platform config directory:
//!
//! - **macOS/Linux**: `~/.config/myt-tools/config.toml`
//! - **Windows**: `%APPDATA%\myt-tools\config.toml`
//!
//! # Example
//!
//! ```ignore
//! use myt_core::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("jira.cloud_id", "acme.atlassian.net")?;
//! config.save()?;
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Error, Result};

/// Config file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Config directory name.
const CONFIG_DIR_NAME: &str = "myt-tools";

/// Atlassian cloud id used when none is configured.
pub const DEFAULT_CLOUD_ID: &str = "credify.atlassian.net";

/// Log levels accepted by `logging.level`.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

// =============================================================================
// Configuration structures
// =============================================================================

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Jira settings used when rendering Atlassian MCP commands
    #[serde(default)]
    pub jira: JiraConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Jira configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JiraConfig {
    /// Atlassian cloud id (site host), e.g. `acme.atlassian.net`
    #[serde(default = "default_cloud_id")]
    pub cloud_id: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter level; `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            cloud_id: default_cloud_id(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_cloud_id() -> String {
    DEFAULT_CLOUD_ID.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// =============================================================================
// Config implementation
// =============================================================================

impl Config {
    /// Directory holding the config file, `<platform config dir>/myt-tools`.
    pub fn config_dir() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| Error::Config("No platform config directory available".to_string()))?;
        Ok(base.join(CONFIG_DIR_NAME))
    }

    /// Full path of the config file.
    pub fn config_path() -> Result<PathBuf> {
        Self::config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
    }

    /// Load from [`config_path`](Self::config_path); defaults if there is no file yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`; defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.is_file() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path).map_err(config_error("read", path))?;
        let config = toml::from_str(&raw).map_err(config_error("parse", path))?;

        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Save to [`config_path`](Self::config_path).
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let raw = toml::to_string_pretty(self).map_err(config_error("serialize", path))?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(config_error("create directory for", path))?;
        }
        fs::write(path, raw).map_err(config_error("write", path))?;

        info!(path = %path.display(), "Saved config");
        Ok(())
    }

    /// Set a configuration value by key path.
    ///
    /// Key format: `section.field` (e.g., `jira.cloud_id`, `logging.level`)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let (section, field) = split_key(key)?;
        let value = value.trim();

        match (section, field) {
            ("jira", "cloud_id" | "cloud") => {
                if value.is_empty() {
                    return Err(Error::Config("jira.cloud_id cannot be empty".to_string()));
                }
                self.jira.cloud_id = value.to_string();
            }
            ("logging", "level") => {
                let level = value.to_ascii_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(Error::Config(format!(
                        "Invalid log level '{}'. Expected one of: {}",
                        value,
                        LOG_LEVELS.join(", ")
                    )));
                }
                self.logging.level = level;
            }
            ("jira" | "logging", _) => {
                return Err(Error::Config(format!(
                    "Unknown {} config field: {}",
                    section, field
                )))
            }
            _ => return Err(Error::Config(format!("Unknown section: {}", section))),
        }

        Ok(())
    }

    /// Get a configuration value by key path.
    pub fn get(&self, key: &str) -> Result<String> {
        let (section, field) = split_key(key)?;

        match (section, field) {
            ("jira", "cloud_id" | "cloud") => Ok(self.jira.cloud_id.clone()),
            ("logging", "level") => Ok(self.logging.level.clone()),
            ("jira" | "logging", _) => Err(Error::Config(format!(
                "Unknown {} config field: {}",
                section, field
            ))),
            _ => Err(Error::Config(format!("Unknown section: {}", section))),
        }
    }
}

/// Map a failure on `path` to a config error naming the action.
fn config_error<E: std::fmt::Display>(
    action: &'static str,
    path: &Path,
) -> impl FnOnce(E) -> Error {
    let path = path.display().to_string();
    move |e| Error::Config(format!("Failed to {} {}: {}", action, path, e))
}

fn split_key(key: &str) -> Result<(&str, &str)> {
    let parts: Vec<&str> = key.split('.').collect();
    match parts.as_slice() {
        [section, field] if !section.is_empty() && !field.is_empty() => Ok((*section, *field)),
        _ => Err(Error::Config(format!(
            "Invalid config key '{}'. Expected format: section.field",
            key
        ))),
    }
}

// =============================================================================
// Tests
// =============================================================================
