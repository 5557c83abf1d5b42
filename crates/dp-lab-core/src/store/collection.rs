//! One record collection backed by one JSON file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{StoreError, StoreResult};
use crate::models::{RecordId, ValidationError};

/// A flat record kept in its own collection file.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Collection name, also the file stem (`jobs` → `jobs.json`).
    const COLLECTION: &'static str;

    fn id(&self) -> &RecordId;

    /// Invariants a stored record must hold to take part in lookups and reports.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Load/save state of a collection, for the host to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionHealth {
    pub collection: &'static str,
    pub records: usize,
    /// Stored records that could not be decoded or failed validation, kept aside
    pub unreadable: usize,
    /// Set when the file could not be read at all
    pub fault: Option<String>,
}

/// In-memory copy of a collection file, in insertion order.
///
/// Every mutation rewrites the whole file. The new contents are built on a
/// copy, written, and only then swapped in, so a failed write leaves memory
/// matching what is on disk.
#[derive(Debug)]
pub struct Collection<T> {
    path: PathBuf,
    records: Vec<T>,
    /// Undecodable or invalid records, written back verbatim after the readable ones
    unreadable: Vec<Value>,
    fault: Option<String>,
}

impl<T: Record> Collection<T> {
    /// Load `<dir>/<COLLECTION>.json`.
    ///
    /// A missing file is an empty collection. A file that cannot be read or
    /// is not a JSON array leaves the collection unavailable; the file is
    /// then never overwritten. Ids generated for records stored without one
    /// are written back straight away so they stay stable across loads.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(format!("{}.json", T::COLLECTION));
        match read_records::<T>(&path) {
            Ok(loaded) => {
                log::info!(
                    "Loaded {} {} record(s) from {}",
                    loaded.records.len(),
                    T::COLLECTION,
                    path.display()
                );
                let collection = Self {
                    path,
                    records: loaded.records,
                    unreadable: loaded.unreadable,
                    fault: None,
                };
                if loaded.missing_ids > 0 {
                    log::info!(
                        "Assigned ids to {} {} record(s)",
                        loaded.missing_ids,
                        T::COLLECTION
                    );
                    if let Err(e) = collection.write(&collection.records) {
                        log::warn!("Could not save assigned {} ids: {}", T::COLLECTION, e);
                    }
                }
                collection
            }
            Err(e) => {
                log::error!("{} collection unavailable: {}", T::COLLECTION, e);
                Self {
                    path,
                    records: Vec::new(),
                    unreadable: Vec::new(),
                    fault: Some(e.to_string()),
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// `false` when the file could not be read and the collection is empty.
    pub fn is_available(&self) -> bool {
        self.fault.is_none()
    }

    pub fn get(&self, id: &RecordId) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn health(&self) -> CollectionHealth {
        CollectionHealth {
            collection: T::COLLECTION,
            records: self.records.len(),
            unreadable: self.unreadable.len(),
            fault: self.fault.clone(),
        }
    }

    /// Append a record and persist.
    pub fn insert(&mut self, record: T) -> StoreResult<()> {
        self.ensure_available()?;
        let mut next = self.records.clone();
        next.push(record);
        self.commit(next)
    }

    /// Replace the record with the same id in place. `false` when absent.
    pub fn replace(&mut self, record: T) -> StoreResult<bool> {
        self.ensure_available()?;
        let Some(position) = self.position(record.id()) else {
            log::info!("No {} record {} to update", T::COLLECTION, record.id());
            return Ok(false);
        };
        let mut next = self.records.clone();
        next[position] = record;
        self.commit(next)?;
        Ok(true)
    }

    /// Remove the record with `id`. `false` when absent.
    pub fn remove(&mut self, id: &RecordId) -> StoreResult<bool> {
        self.ensure_available()?;
        let Some(position) = self.position(id) else {
            log::info!("No {} record {} to delete", T::COLLECTION, id);
            return Ok(false);
        };
        let mut next = self.records.clone();
        next.remove(position);
        self.commit(next)?;
        Ok(true)
    }

    fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    fn ensure_available(&self) -> StoreResult<()> {
        match &self.fault {
            Some(reason) => Err(StoreError::Unavailable {
                collection: T::COLLECTION,
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    fn commit(&mut self, next: Vec<T>) -> StoreResult<()> {
        self.write(&next)?;
        self.records = next;
        Ok(())
    }

    fn write(&self, records: &[T]) -> StoreResult<()> {
        let mut values = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        values.extend(self.unreadable.iter().cloned());
        let json = serde_json::to_string_pretty(&values)?;

        // Write beside the target and rename over it.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, json).map_err(|source| StoreError::Io {
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        log::debug!("Wrote {} {} record(s)", records.len(), T::COLLECTION);
        Ok(())
    }
}

/// Contents of a collection file that parsed as a JSON array.
struct Loaded<T> {
    records: Vec<T>,
    unreadable: Vec<Value>,
    /// Readable records stored without an id
    missing_ids: usize,
}

impl<T> Default for Loaded<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            unreadable: Vec::new(),
            missing_ids: 0,
        }
    }
}

fn read_records<T: Record>(path: &Path) -> StoreResult<Loaded<T>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Loaded::default()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if text.trim().is_empty() {
        return Ok(Loaded::default());
    }

    let values = match serde_json::from_str::<Value>(&text) {
        Ok(Value::Array(values)) => values,
        Ok(_) => {
            return Err(StoreError::Corrupt {
                path: path.to_path_buf(),
                reason: "expected a JSON array of records".into(),
            })
        }
        Err(e) => {
            return Err(StoreError::Corrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        }
    };

    let mut loaded = Loaded {
        records: Vec::with_capacity(values.len()),
        ..Loaded::default()
    };
    for (position, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<T>(value.clone()) {
            Ok(record) => match record.validate() {
                Ok(()) => {
                    if value.get("id").is_none() {
                        loaded.missing_ids += 1;
                    }
                    loaded.records.push(record);
                }
                Err(e) => {
                    log::warn!(
                        "Keeping invalid {} record #{} aside: {}",
                        T::COLLECTION,
                        position,
                        e
                    );
                    loaded.unreadable.push(value);
                }
            },
            Err(e) => {
                log::warn!(
                    "Keeping unreadable {} record #{} aside: {}",
                    T::COLLECTION,
                    position,
                    e
                );
                loaded.unreadable.push(value);
            }
        }
    }
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Clinic, Job};
    use crate::report::revenue_by_clinic;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let clinics: Collection<Clinic> = Collection::load(dir.path());
        assert!(clinics.records().is_empty());
        assert_eq!(clinics.health().fault, None);
    }

    #[test]
    fn test_insert_replace_remove_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut clinics: Collection<Clinic> = Collection::load(dir.path());

        let clinic = Clinic::new("Smile Dental").unwrap();
        clinics.insert(clinic.clone()).unwrap();

        let mut renamed = clinic.clone();
        renamed.name = "Smile Dental Center".into();
        assert!(clinics.replace(renamed).unwrap());

        let reloaded: Collection<Clinic> = Collection::load(dir.path());
        assert_eq!(reloaded.records().len(), 1);
        assert_eq!(reloaded.records()[0].name, "Smile Dental Center");
        assert_eq!(reloaded.records()[0].id, clinic.id);

        assert!(clinics.remove(&clinic.id).unwrap());
        assert!(!clinics.remove(&clinic.id).unwrap());
        let reloaded: Collection<Clinic> = Collection::load(dir.path());
        assert!(reloaded.records().is_empty());
    }

    #[test]
    fn test_unknown_id_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let mut clinics: Collection<Clinic> = Collection::load(dir.path());
        let stranger = Clinic::new("Nowhere").unwrap();
        assert!(!clinics.replace(stranger).unwrap());
        // Nothing was written for a miss.
        assert!(!dir.path().join("clinics.json").exists());
    }

    #[test]
    fn test_unreadable_records_survive_a_save() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "clinics.json",
            r#"[{"id": "c1", "name": "Smile Dental"}, {"label": "not a clinic"}]"#,
        );

        let mut clinics: Collection<Clinic> = Collection::load(dir.path());
        assert_eq!(clinics.records().len(), 1);
        assert_eq!(clinics.health().unreadable, 1);

        clinics.insert(Clinic::new("Bright Clinic").unwrap()).unwrap();

        let text = fs::read_to_string(dir.path().join("clinics.json")).unwrap();
        assert!(text.contains("not a clinic"));
        let reloaded: Collection<Clinic> = Collection::load(dir.path());
        assert_eq!(reloaded.records().len(), 2);
        assert_eq!(reloaded.health().unreadable, 1);
    }

    #[test]
    fn test_invalid_stored_records_are_kept_aside() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "jobs.json",
            r#"[
                {"id": "j1", "first_name": "Ayla", "clinic": "A", "prosthesis": "Crown",
                 "count": 1, "date": "15/01/2024", "total_price": "100.00"},
                {"id": "j2", "first_name": "", "clinic": "A", "prosthesis": "Crown",
                 "count": 0, "date": "16/01/2024", "total_price": "-90.00"}
            ]"#,
        );

        let mut jobs: Collection<Job> = Collection::load(dir.path());
        assert_eq!(jobs.records().len(), 1);
        assert_eq!(jobs.health().unreadable, 1);

        let revenue = revenue_by_clinic(jobs.records());
        assert_eq!(revenue[0].total.to_string(), "100.00");

        assert!(jobs.remove(&RecordId::from("j1")).unwrap());
        let text = fs::read_to_string(dir.path().join("jobs.json")).unwrap();
        assert!(text.contains("\"j2\""));
        assert!(text.contains("-90.00"));
    }

    #[test]
    fn test_generated_ids_are_saved_on_load() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "clinics.json", r#"[{"name": "Smile Dental"}]"#);

        let first: Collection<Clinic> = Collection::load(dir.path());
        let second: Collection<Clinic> = Collection::load(dir.path());
        assert_eq!(first.records()[0].id, second.records()[0].id);

        let text = fs::read_to_string(dir.path().join("clinics.json")).unwrap();
        assert!(text.contains(first.records()[0].id.as_str()));
    }

    #[test]
    fn test_corrupt_file_makes_collection_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "clinics.json", "{ this is not json");

        let mut clinics: Collection<Clinic> = Collection::load(dir.path());
        assert!(clinics.health().fault.is_some());

        let err = clinics.insert(Clinic::new("Smile Dental").unwrap()).unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { collection: "clinics", .. }));

        // The corrupt file is left untouched.
        let text = fs::read_to_string(dir.path().join("clinics.json")).unwrap();
        assert_eq!(text, "{ this is not json");
    }

    #[test]
    fn test_failed_write_keeps_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        fs::create_dir(&data_dir).unwrap();

        let mut clinics: Collection<Clinic> = Collection::load(&data_dir);
        clinics.insert(Clinic::new("Smile Dental").unwrap()).unwrap();

        fs::remove_dir_all(&data_dir).unwrap();
        let result = clinics.insert(Clinic::new("Bright Clinic").unwrap());

        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert_eq!(clinics.records().len(), 1);
    }

    #[test]
    fn test_file_is_pretty_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let mut clinics: Collection<Clinic> = Collection::load(dir.path());
        clinics.insert(Clinic::new("Gülüş Diş").unwrap()).unwrap();

        let text = fs::read_to_string(dir.path().join("clinics.json")).unwrap();
        assert!(text.contains("Gülüş Diş"));
        assert!(text.contains('\n'));
    }
}
