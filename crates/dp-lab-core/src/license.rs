//! License activation check run before the store is opened.
//!
//! The keys file lists plain keys, one per line. Only the SHA-256 of an
//! accepted key is saved, and a saved activation stays valid only while its
//! key is still listed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::LabConfig;

#[derive(Error, Debug)]
pub enum LicenseError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to save activation to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Hex SHA-256 of a license key.
pub fn hash_license_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone)]
pub struct LicenseGate {
    keys_file: PathBuf,
    activation_file: PathBuf,
}

impl LicenseGate {
    pub fn new(keys_file: impl Into<PathBuf>, activation_file: impl Into<PathBuf>) -> Self {
        Self {
            keys_file: keys_file.into(),
            activation_file: activation_file.into(),
        }
    }

    pub fn from_config(config: &LabConfig) -> Self {
        Self::new(&config.license_keys_file, &config.activation_file)
    }

    /// Whether `hashed_key` is the hash of a key in the keys file.
    /// A missing keys file holds no valid keys.
    pub fn is_valid_hash(&self, hashed_key: &str) -> Result<bool, LicenseError> {
        let Some(content) = read_optional(&self.keys_file)? else {
            log::warn!("License keys file {} not found", self.keys_file.display());
            return Ok(false);
        };
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .any(|line| hash_license_key(line) == hashed_key))
    }

    /// Check the saved activation, if any.
    pub fn verify(&self) -> Result<bool, LicenseError> {
        let Some(saved) = read_optional(&self.activation_file)? else {
            return Ok(false);
        };
        let saved = saved.trim();
        if saved.is_empty() {
            return Ok(false);
        }
        self.is_valid_hash(saved)
    }

    /// Activate with a plain key. The hash is saved only when the key is valid.
    pub fn activate(&self, key: &str) -> Result<bool, LicenseError> {
        let hashed = hash_license_key(key.trim());
        if !self.is_valid_hash(&hashed)? {
            log::warn!("Rejected license key");
            return Ok(false);
        }
        fs::write(&self.activation_file, &hashed).map_err(|source| LicenseError::Write {
            path: self.activation_file.clone(),
            source,
        })?;
        log::info!("License activated");
        Ok(true)
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, LicenseError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(LicenseError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
