//! Service configuration for moodring-ml
//!
//! Each setting resolves CLI → ENV → TOML → compiled default. Clap covers the
//! first two tiers (`env = ...` on each argument), the TOML tier comes from
//! [`moodring_common::config`].

use clap::Parser;
use moodring_common::config::{TomlConfig, CONFIG_ENV_VAR};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use moodring_common::{Error, Result};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_MODEL_FILE: &str = "model/mood_model.json";
pub const DEFAULT_LABEL_MAP_FILE: &str = "model/label_map.toml";

/// Command-line arguments for moodring-ml
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "moodring-ml")]
#[command(about = "Mood prediction and aggregation microservice")]
#[command(version)]
pub struct CliArgs {
    /// Address to bind
    #[arg(long, env = "MOODRING_ML_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "MOODRING_ML_PORT")]
    pub port: Option<u16>,

    /// Classifier artifact (JSON)
    #[arg(short, long, env = "MOODRING_ML_MODEL")]
    pub model: Option<PathBuf>,

    /// Class id → mood label table (TOML)
    #[arg(short, long, env = "MOODRING_ML_LABEL_MAP")]
    pub label_map: Option<PathBuf>,

    /// Config file, overrides the platform search
    #[arg(short, long, env = CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    pub label_map_path: PathBuf,
    pub log_level: String,
}

impl ServiceConfig {
    /// Merge the CLI/ENV tiers over the TOML tier, filling gaps with defaults
    ///
    /// Relative default artifact paths are anchored at `artifact_root`.
    pub fn resolve(args: &CliArgs, toml: &TomlConfig, artifact_root: &Path) -> Self {
        let ml = &toml.ml;
        Self {
            host: args
                .host
                .clone()
                .or_else(|| ml.host.clone())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: args.port.or(ml.port).unwrap_or(DEFAULT_PORT),
            model_path: args
                .model
                .clone()
                .or_else(|| ml.model_path.clone())
                .unwrap_or_else(|| artifact_root.join(DEFAULT_MODEL_FILE)),
            label_map_path: args
                .label_map
                .clone()
                .or_else(|| ml.label_map_path.clone())
                .unwrap_or_else(|| artifact_root.join(DEFAULT_LABEL_MAP_FILE)),
            log_level: toml.logging.level.clone(),
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port).parse().map_err(|e| {
            Error::Config(format!("Invalid bind address {}:{}: {}", self.host, self.port, e))
        })
    }
}

/// Directory holding the running executable
///
/// Default artifacts ship next to the binary. Falls back to the working
/// directory when the executable path is unavailable.
pub fn executable_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
