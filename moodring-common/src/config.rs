//! Configuration file loading
//!
//! Moodring settings resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! This module owns tier 3. A missing config file is not an error: services
//! log a warning and continue on defaults. A file that exists but does not
//! parse is an error.
//!
//! Loading happens before a service installs its tracing subscriber (the file
//! carries the log level), so nothing here logs. [`ConfigSource`] tells the
//! caller what to report once logging is up.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "MOODRING_CONFIG";

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Mood service settings
    pub ml: MlConfig,
    /// Logging settings shared by all services
    pub logging: LoggingConfig,
}

/// `[ml]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Classifier artifact (JSON)
    pub model_path: Option<PathBuf>,
    /// Class id → label table (TOML)
    pub label_map_path: Option<PathBuf>,
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl TomlConfig {
    /// Parse config text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Parse(format!("config.toml: {}", e)))
    }

    /// Read and parse a config file that must exist
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }
}

/// Locate the platform config file, if one exists
///
/// Linux checks `~/.config/moodring/config.toml` then
/// `/etc/moodring/config.toml`; other platforms use the user config dir.
pub fn find_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("moodring").join("config.toml"));
    if let Some(path) = user_config.filter(|p| p.exists()) {
        return Some(path);
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/moodring/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Where the TOML tier came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Path given on the command line or via `MOODRING_CONFIG`
    Explicit(PathBuf),
    /// Found by the platform search
    Discovered(PathBuf),
    /// No file found, compiled defaults in effect
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(path) | ConfigSource::Discovered(path) => Some(path),
            ConfigSource::Defaults => None,
        }
    }
}

/// Load the TOML tier
///
/// An explicit path (from the command line or `MOODRING_CONFIG`) must exist.
/// Without one, the platform location is searched and defaults are used when
/// nothing is found.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<(TomlConfig, ConfigSource)> {
    if let Some(path) = explicit {
        let config = TomlConfig::from_file(path)?;
        return Ok((config, ConfigSource::Explicit(path.to_path_buf())));
    }

    match find_config_file() {
        Some(path) => {
            let config = TomlConfig::from_file(&path)?;
            Ok((config, ConfigSource::Discovered(path)))
        }
        None => Ok((TomlConfig::default(), ConfigSource::Defaults)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_ml_section() {
        let config = TomlConfig::from_toml_str("[ml]\nport = 6001\n").unwrap();
        assert_eq!(config.ml.port, Some(6001));
        assert_eq!(config.ml.host, None);
        assert_eq!(config.ml.model_path, None);
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let result = TomlConfig::from_toml_str("[ml\nport = ");
        assert!(matches!(result, Err(Error::Parse(_))));
    }
}
