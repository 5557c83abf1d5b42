//! Record store: one JSON file per collection under a data directory.

mod collection;
mod directory;
mod finance;
mod inventory;
mod jobs;
mod prices;

pub use collection::*;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{Clinic, Doctor, FinanceEntry, InventoryItem, Job, PriceEntry, ValidationError};
use crate::report::LabReport;

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unreadable collection file {}: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("The {collection} collection is unavailable: {reason}")]
    Unavailable {
        collection: &'static str,
        reason: String,
    },

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Owner of every record collection.
///
/// Each collection loads on its own: one unreadable file does not prevent
/// the others from being used.
#[derive(Debug)]
pub struct LabStore {
    data_dir: PathBuf,
    jobs: Collection<Job>,
    clinics: Collection<Clinic>,
    doctors: Collection<Doctor>,
    prices: Collection<PriceEntry>,
    finance: Collection<FinanceEntry>,
    inventory: Collection<InventoryItem>,
}

impl LabStore {
    /// Open the store rooted at `data_dir`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> StoreResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir).map_err(|source| StoreError::Io {
            path: data_dir.clone(),
            source,
        })?;

        let store = Self {
            jobs: Collection::load(&data_dir),
            clinics: Collection::load(&data_dir),
            doctors: Collection::load(&data_dir),
            prices: Collection::load(&data_dir),
            finance: Collection::load(&data_dir),
            inventory: Collection::load(&data_dir),
            data_dir,
        };
        log::info!("Opened lab store at {}", store.data_dir.display());
        Ok(store)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load state of every collection.
    pub fn health(&self) -> Vec<CollectionHealth> {
        vec![
            self.jobs.health(),
            self.clinics.health(),
            self.doctors.health(),
            self.prices.health(),
            self.finance.health(),
            self.inventory.health(),
        ]
    }

    /// Build all reports from the current collections.
    ///
    /// Unreadable inputs are listed in [`LabReport::unavailable`].
    pub fn report(&self) -> LabReport {
        let mut report =
            LabReport::build(self.clinics.records(), self.jobs.records(), self.finance.records());
        let inputs = [
            (Clinic::COLLECTION, self.clinics.is_available()),
            (Job::COLLECTION, self.jobs.is_available()),
            (FinanceEntry::COLLECTION, self.finance.is_available()),
        ];
        for (collection, available) in inputs {
            if !available {
                log::warn!("Report built without the {} collection", collection);
                report.unavailable.push(collection.to_string());
            }
        }
        report
    }
}
