use crate::settings::SimulationSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Complete application configuration, stored as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Version field for future compatibility
    pub version: u32,
    /// Engine parameters
    pub settings: SimulationSettings,
    /// Target frames per second of the terminal loop
    pub fps: u32,
    /// Whether the sidebar and in-flight walkers are drawn at startup
    pub show_ui: bool,
    /// Where snapshots are written
    pub snapshot_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            settings: SimulationSettings::default(),
            fps: 120,
            show_ui: true,
            snapshot_dir: PathBuf::from("snapshots"),
        }
    }
}

impl AppConfig {
    /// Default location: `<config dir>/dla-lattice/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dla-lattice").join("config.json"))
    }

    /// Export config to a JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigFileError> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigFileError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, json).map_err(|source| ConfigFileError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Import config from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigFileError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigFileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if given, else the default location if it exists, else defaults
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigFileError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::load_from_file(&default),
                _ => Ok(Self::default()),
            },
        }
    }
}
