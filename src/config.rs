use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::clipboard::{BackendKind, Selection};
use crate::render::PREVIEW_BYTES;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
}

/// General configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Bytes shown in hex previews of binary and image payloads
    #[serde(default = "default_max_preview_bytes")]
    pub max_preview_bytes: usize,

    /// Clipboard backend: auto, wayland or x11
    #[serde(default)]
    pub backend: BackendKind,

    /// Selection to inspect: clipboard or primary
    #[serde(default)]
    pub selection: Selection,

    /// Log level when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Write logs to this file instead of stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            max_preview_bytes: default_max_preview_bytes(),
            backend: BackendKind::default(),
            selection: Selection::default(),
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

impl Config {
    /// Reject values the command line would also reject
    pub fn validate(&self) -> Result<()> {
        if self.general.max_preview_bytes == 0 {
            bail!("general.max_preview_bytes must be at least 1");
        }
        Ok(())
    }
}

// Default value functions for serde
fn default_max_preview_bytes() -> usize {
    PREVIEW_BYTES
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Default config location
///
/// XDG Base Directory Specification:
/// - Config: $XDG_CONFIG_HOME/clipdump/clipdump.toml (default: ~/.config/clipdump/clipdump.toml)
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("clipdump")
    } else {
        let home = env::var("HOME").context("HOME environment variable not set")?;
        PathBuf::from(home).join(".config/clipdump")
    };

    Ok(config_dir.join("clipdump.toml"))
}

/// Read-only TOML configuration source
pub struct TomlConfigStorage {
    path: PathBuf,
}

impl TomlConfigStorage {
    /// Create a new TomlConfigStorage with the given path
    pub fn new(path: PathBuf) -> Self {
        TomlConfigStorage { path }
    }

    /// Load configuration; a missing file yields defaults and is not created
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            log::debug!("Config file not found at {:?}, using defaults", self.path);
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config from {:?}", self.path))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", self.path))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file {:?}", self.path))?;

        log::debug!(
            "Loaded configuration from {:?}: max_preview_bytes={}, backend={:?}",
            self.path,
            config.general.max_preview_bytes,
            config.general.backend
        );

        Ok(config)
    }
}
