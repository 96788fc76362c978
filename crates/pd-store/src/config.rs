//! Data directory resolution and the optional `config.toml`.
//!
//! ```toml
//! [overlay]
//! density = 2.75
//!
//! [display]
//! width = 1080
//! height = 2340
//! ```

use std::path::{Path, PathBuf};
use std::{env, fs};

use pd_core::{DEFAULT_DENSITY, DisplayMetrics};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

pub const CONFIG_FILENAME: &str = "config.toml";

/// `$PETDESK_DATA_DIR`, else `~/.petdesk`.
pub fn default_base_dir() -> PathBuf {
    if let Ok(dir) = env::var("PETDESK_DATA_DIR")
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }
    dirs_home().join(".petdesk")
}

fn dirs_home() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub overlay: OverlayConfig,
    pub display: DisplayConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    /// Physical pixels per density-independent pixel.
    pub density: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            density: DEFAULT_DENSITY,
        }
    }
}

/// Display dimensions used when the host has no live metrics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub width: i64,
    pub height: i64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
        }
    }
}

impl DisplayMetrics for DisplayConfig {
    fn display_width(&self) -> i64 {
        self.width
    }

    fn display_height(&self) -> i64 {
        self.height
    }
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| StoreError::Config(e.to_string()))?;
        if !(config.overlay.density.is_finite() && config.overlay.density > 0.0) {
            return Err(StoreError::Config(format!(
                "overlay.density must be a positive number, got {}",
                config.overlay.density
            )));
        }
        Ok(config)
    }

    /// Read `config.toml` from `base_dir`. A missing file yields defaults.
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILENAME);
        match fs::read_to_string(&path) {
            Ok(content) => {
                let config = Self::parse(&content).map_err(|e| match e {
                    StoreError::Config(msg) => {
                        StoreError::Config(format!("{}: {msg}", path.display()))
                    }
                    other => other,
                })?;
                tracing::info!("loaded config from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| StoreError::Config(e.to_string()))
    }
}
