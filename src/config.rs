// src/config.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::sampler::DEFAULT_TICK_INTERVAL;
use crate::window::DEFAULT_WINDOW_CAPACITY;

pub const CONFIG_ENV_VAR: &str = "PING_TESTER_CONFIG";
const CONFIG_DIR_NAME: &str = "ping-tester";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PingConfig {
    pub host: String,                  // Default: www.google.com
    pub window_capacity: usize,        // Default: 50 samples
    pub tick_interval_ms: u64,         // Default: 100 ms
    pub program: String,               // Default: ping
    pub spawn_failure_warn_after: u32, // Default: 5, 0 disables
}

impl Default for PingConfig {
    fn default() -> Self {
        PingConfig {
            host: "www.google.com".to_string(),
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            tick_interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            program: "ping".to_string(),
            spawn_failure_warn_after: 5,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read config {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid config {}: {}", path.display(), source)
            }
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl PingConfig {
    /// Defaults, overlaid with the first config file found: `explicit`,
    /// then `$PING_TESTER_CONFIG`, then the per-user config dir.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match resolve_config_path(explicit) {
            Some(path) => PingConfig::from_file(&path),
            None => Ok(PingConfig::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".into()));
        }
        if self.program.trim().is_empty() {
            return Err(ConfigError::Invalid("program must not be empty".into()));
        }
        if self.window_capacity == 0 {
            return Err(ConfigError::Invalid(
                "window_capacity must be at least 1".into(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_interval_ms must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push(CONFIG_DIR_NAME);
    path.push(CONFIG_FILE_NAME);
    Some(path)
}

// Explicit and env paths must exist; the default one is optional.
fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(value) = std::env::var(CONFIG_ENV_VAR) {
        if !value.trim().is_empty() {
            return Some(PathBuf::from(value.trim()));
        }
    }
    default_config_path().filter(|path| path.is_file())
}
