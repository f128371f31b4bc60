//! Viewer configuration (config.toml)
//!
//! Camera tuning, sphere tessellation and import options, stored as TOML in
//! the platform-specific config directory. Every field has a default, so a
//! partial or empty file is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::axis::UpAxis;
use crate::camera::CameraSettings;
use crate::import::ImportOptions;

/// File name inside [`config_dir`]
pub const CONFIG_FILE: &str = "config.toml";

/// Viewer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ViewerConfig {
    /// World up axis shared by the sphere generator and the camera (default: y)
    #[serde(default)]
    pub up: UpAxis,
    /// Orbit camera settings
    #[serde(default)]
    pub camera: CameraSettings,
    /// Procedural sphere settings
    #[serde(default)]
    pub sphere: SphereConfig,
    /// STL import settings
    #[serde(default)]
    pub import: ImportOptions,
}

/// Procedural sphere tessellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SphereConfig {
    /// Latitude bands (default: 32, minimum: 1)
    #[serde(default = "default_lat_bands")]
    pub lat_bands: u32,
    /// Longitude bands (default: 32, minimum: 3)
    #[serde(default = "default_lon_bands")]
    pub lon_bands: u32,
}

fn default_lat_bands() -> u32 {
    32
}
fn default_lon_bands() -> u32 {
    32
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            lat_bands: default_lat_bands(),
            lon_bands: default_lon_bands(),
        }
    }
}

/// Configuration read/write failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to access config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Returns the platform-specific configuration directory.
///
/// On Linux: `~/.config/raymesh`
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io", "raymesh", "raymesh")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default path of the config file, if a config directory exists
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

impl ViewerConfig {
    /// Loads the configuration from the platform config directory.
    ///
    /// Returns defaults if the file doesn't exist or cannot be parsed.
    pub fn load() -> Self {
        config_path()
            .and_then(|path| Self::load_from(&path).ok())
            .unwrap_or_default()
    }

    /// Loads the configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(io_err)
    }

    /// Import options with the viewer's up axis applied
    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            up: self.up,
            ..self.import
        }
    }
}
