//! Lab configuration loaded from an optional TOML file.
//!
//! Every field has a default, so an empty file or no file at all is a valid
//! configuration. Relative paths in a config file are taken relative to the
//! directory holding that file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Name of the activation file kept in the user's home directory.
pub const ACTIVATION_FILE_NAME: &str = ".dp_lab_license.key";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Directory holding one JSON file per collection
    pub data_dir: PathBuf,
    /// Filter passed to the logger, e.g. `info` or `dp_lab_core=debug`
    pub log_filter: String,
    /// Plain license keys, one per line
    pub license_keys_file: PathBuf,
    /// Where the hash of an accepted key is saved
    pub activation_file: PathBuf,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            log_filter: "info".to_string(),
            license_keys_file: PathBuf::from("licenses.txt"),
            activation_file: default_activation_file(),
        }
    }
}

fn default_activation_file() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(ACTIVATION_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(ACTIVATION_FILE_NAME))
}

impl LabConfig {
    /// Load the configuration, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: LabConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for field in [
            &mut self.data_dir,
            &mut self.license_keys_file,
            &mut self.activation_file,
        ] {
            if field.is_relative() {
                *field = base.join(&*field);
            }
        }
    }
}
