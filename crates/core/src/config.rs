//! Configuration for gopaths.
//!
//! Config priority: `$GOPATHS_CONFIG_DIR/config.toml` >
//! `$XDG_CONFIG_HOME/gopaths/config.toml` > platform config dir > defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid config {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },
}

// ============================================================================
// Daemon Configuration
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
  /// Log level: "off", "error", "warn", "info", "debug", "trace"
  /// Default: "info"
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

fn default_log_level() -> String {
  "info".to_string()
}

impl Default for DaemonConfig {
  fn default() -> Self {
    Self {
      log_level: default_log_level(),
    }
  }
}

// ============================================================================
// Path Discovery Configuration
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
  /// Toolchain install root; discovered from `PATH` when unset
  #[serde(skip_serializing_if = "Option::is_none")]
  pub toolchain_root: Option<PathBuf>,

  /// Platform tag (`os_arch`) used for the archive layout; host when unset
  #[serde(skip_serializing_if = "Option::is_none")]
  pub platform: Option<String>,
}

// ============================================================================
// Main Configuration
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
  /// Daemon settings
  #[serde(default)]
  pub daemon: DaemonConfig,

  /// Search root settings
  #[serde(default)]
  pub paths: PathsConfig,
}

impl Config {
  /// Load the user config, falling back to defaults
  pub fn load() -> Self {
    let Some(path) = Self::user_config_path() else {
      return Self::default();
    };
    if !path.exists() {
      return Self::default();
    }

    match Self::load_from(&path) {
      Ok(config) => config,
      Err(e) => {
        warn!("Ignoring config: {}", e);
        Self::default()
      }
    }
  }

  /// Load config from an explicit file
  pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Get the user-level config path
  pub fn user_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("GOPATHS_CONFIG_DIR") {
      return Some(PathBuf::from(path).join("config.toml"));
    }

    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
      return Some(PathBuf::from(path).join("gopaths").join("config.toml"));
    }

    dirs::config_dir().map(|p: PathBuf| p.join("gopaths").join("config.toml"))
  }
}
