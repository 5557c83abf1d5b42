//! Job store operations.

use super::{LabStore, Record, StoreResult};
use crate::models::{Job, JobInput, JobStatus, RecordId, ValidationError};
use crate::pricing;

impl Record for Job {
    const COLLECTION: &'static str = "jobs";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Job::validate(self)
    }
}

impl LabStore {
    /// All jobs in insertion order.
    pub fn jobs(&self) -> &[Job] {
        self.jobs.records()
    }

    pub fn get_job(&self, id: &RecordId) -> Option<&Job> {
        self.jobs.get(id)
    }

    /// Validate a job form and append the job.
    ///
    /// A blank total is quoted from the current price list.
    pub fn create_job(&mut self, input: JobInput) -> StoreResult<Job> {
        let prices = self.prices.records();
        let job = input.into_job(RecordId::generate(), |prosthesis, clinic, count| {
            pricing::total_for(prosthesis, clinic, count, prices)
        })?;
        self.jobs.insert(job.clone())?;
        log::info!("Created job {} for clinic '{}'", job.id, job.clinic);
        Ok(job)
    }

    /// Replace a job from an edited form. `None` when the id is unknown.
    ///
    /// A form without a status keeps the job's current status.
    pub fn update_job(&mut self, id: &RecordId, mut input: JobInput) -> StoreResult<Option<Job>> {
        let Some(existing) = self.jobs.get(id) else {
            log::info!("No job {} to update", id);
            return Ok(None);
        };
        if input.status.is_none() {
            input.status = Some(existing.status);
        }
        let prices = self.prices.records();
        let job = input.into_job(id.clone(), |prosthesis, clinic, count| {
            pricing::total_for(prosthesis, clinic, count, prices)
        })?;
        let replaced = self.jobs.replace(job.clone())?;
        Ok(replaced.then_some(job))
    }

    /// Move a job to another workflow status.
    pub fn set_job_status(&mut self, id: &RecordId, status: JobStatus) -> StoreResult<bool> {
        let Some(job) = self.jobs.get(id) else {
            return Ok(false);
        };
        let mut job = job.clone();
        job.status = status;
        self.jobs.replace(job)
    }

    pub fn delete_job(&mut self, id: &RecordId) -> StoreResult<bool> {
        let deleted = self.jobs.remove(id)?;
        if deleted {
            log::info!("Deleted job {}", id);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    fn form(count: &str) -> JobInput {
        JobInput {
            first_name: "Ayla".into(),
            last_name: "Demir".into(),
            clinic: "X".into(),
            doctor: "Dr. Kaya".into(),
            prosthesis: "Crown".into(),
            count: count.into(),
            date: "15/01/2024".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_job_quotes_from_price_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LabStore::open(dir.path()).unwrap();
        store.add_price("Crown", "General", "500").unwrap();

        let job = store.create_job(form("2")).unwrap();
        assert_eq!(job.total_price.to_string(), "1000.00");

        let reopened = LabStore::open(dir.path()).unwrap();
        assert_eq!(reopened.jobs(), &[job]);
    }

    #[test]
    fn test_invalid_job_is_not_stored() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LabStore::open(dir.path()).unwrap();

        let err = store.create_job(form("zero")).unwrap_err();
        assert!(matches!(err, StoreError::Validation(ValidationError::InvalidNumber { .. })));
        assert!(store.jobs().is_empty());
        assert!(!dir.path().join("jobs.json").exists());
    }

    #[test]
    fn test_update_keeps_identity_and_position() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LabStore::open(dir.path()).unwrap();
        let first = store.create_job(form("1")).unwrap();
        let second = store.create_job(form("1")).unwrap();

        let mut edited = form("3");
        edited.note = "shade A2".into();
        let updated = store.update_job(&first.id, edited).unwrap().unwrap();

        assert_eq!(updated.id, first.id);
        assert_eq!(store.jobs()[0].note, "shade A2");
        assert_eq!(store.jobs()[1].id, second.id);
    }

    #[test]
    fn test_identical_jobs_are_edited_independently() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LabStore::open(dir.path()).unwrap();
        let a = store.create_job(form("1")).unwrap();
        let b = store.create_job(form("1")).unwrap();

        assert!(store.delete_job(&b.id).unwrap());
        assert_eq!(store.jobs().len(), 1);
        assert_eq!(store.jobs()[0].id, a.id);
    }

    #[test]
    fn test_unknown_ids_are_misses() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LabStore::open(dir.path()).unwrap();
        let ghost = RecordId::from("ghost");
        assert_eq!(store.update_job(&ghost, form("1")).unwrap(), None);
        assert!(!store.delete_job(&ghost).unwrap());
        assert!(!store.set_job_status(&ghost, JobStatus::Delivered).unwrap());
    }

    #[test]
    fn test_edit_without_status_keeps_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LabStore::open(dir.path()).unwrap();
        let job = store.create_job(form("1")).unwrap();
        store.set_job_status(&job.id, JobStatus::Delivered).unwrap();

        let updated = store.update_job(&job.id, form("2")).unwrap().unwrap();
        assert_eq!(updated.status, JobStatus::Delivered);

        let mut reopened = form("2");
        reopened.status = Some(JobStatus::InProgress);
        let updated = store.update_job(&job.id, reopened).unwrap().unwrap();
        assert_eq!(updated.status, JobStatus::InProgress);
    }

    #[test]
    fn test_set_job_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LabStore::open(dir.path()).unwrap();
        let job = store.create_job(form("1")).unwrap();
        assert!(store.set_job_status(&job.id, JobStatus::Delivered).unwrap());
        assert_eq!(store.get_job(&job.id).unwrap().status, JobStatus::Delivered);
    }
}
