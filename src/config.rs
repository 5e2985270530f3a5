//! Application configuration.
//!
//! Configuration is stored in `config.yaml` under the platform config
//! directory (e.g. `~/.config/dexview/config.yaml`) and includes:
//! - The catalog API base URL
//! - HTTP request and connect timeouts
//!
//! `DEXVIEW_CONFIG` points at an alternative config file and
//! `DEXVIEW_BASE_URL` overrides the base URL for a single run.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DexError, Result};
use crate::remote::client::DEFAULT_BASE_URL;

pub const CONFIG_PATH_ENV: &str = "DEXVIEW_CONFIG";
pub const BASE_URL_ENV: &str = "DEXVIEW_BASE_URL";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root of the catalog REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds (default: 10)
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Config {
    /// Keys accepted by `get`/`set`.
    pub const KEYS: &[&str] = &["base_url", "timeout_secs", "connect_timeout_secs"];

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV)
            && !path.is_empty()
        {
            return Ok(PathBuf::from(path));
        }

        let dirs = directories::ProjectDirs::from("", "", "dexview").ok_or_else(|| {
            DexError::Config("cannot determine the configuration directory".to_string())
        })?;
        Ok(dirs.config_dir().join("config.yaml"))
    }

    /// Load configuration from the default location and apply environment
    /// overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        if let Ok(base_url) = env::var(BASE_URL_ENV)
            && !base_url.is_empty()
        {
            config.base_url = base_url;
        }
        Ok(config)
    }

    /// Load configuration from `path`, or return default if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Read a single key as a string
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "base_url" => Ok(self.base_url.clone()),
            "timeout_secs" => Ok(self.timeout_secs.to_string()),
            "connect_timeout_secs" => Ok(self.connect_timeout_secs.to_string()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Validate and set a single key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "base_url" => {
                Url::parse(value).map_err(|e| {
                    DexError::Config(format!("invalid base_url '{value}': {e}"))
                })?;
                self.base_url = value.to_string();
            }
            "timeout_secs" => self.timeout_secs = parse_secs(key, value)?,
            "connect_timeout_secs" => self.connect_timeout_secs = parse_secs(key, value)?,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn parse_secs(key: &str, value: &str) -> Result<u64> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(DexError::Config(format!(
            "{key} must be a positive number of seconds, got '{value}'"
        ))),
    }
}

fn unknown_key(key: &str) -> DexError {
    DexError::Config(format!(
        "unknown config key '{key}', expected one of: {}",
        Config::KEYS.join(", ")
    ))
}
