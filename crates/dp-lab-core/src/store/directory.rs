//! Clinic and doctor directory operations.
//!
//! Removing a clinic leaves its doctors, jobs, prices and payments in place.

use super::{LabStore, Record, StoreResult};
use crate::models::{require_text, Clinic, Doctor, RecordId, ValidationError};

impl Record for Clinic {
    const COLLECTION: &'static str = "clinics";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("clinic name", &self.name).map(|_| ())
    }
}

impl Record for Doctor {
    const COLLECTION: &'static str = "doctors";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("doctor name", &self.name).map(|_| ())
    }
}

impl LabStore {
    pub fn clinics(&self) -> &[Clinic] {
        self.clinics.records()
    }

    /// Register a clinic. Names must be unique.
    pub fn add_clinic(&mut self, name: &str) -> StoreResult<Clinic> {
        let clinic = Clinic::new(name)?;
        if self.clinics.records().iter().any(|c| c.name == clinic.name) {
            return Err(ValidationError::DuplicateClinic(clinic.name).into());
        }
        self.clinics.insert(clinic.clone())?;
        log::info!("Added clinic '{}'", clinic.name);
        Ok(clinic)
    }

    pub fn delete_clinic(&mut self, id: &RecordId) -> StoreResult<bool> {
        self.clinics.remove(id)
    }

    pub fn doctors(&self) -> &[Doctor] {
        self.doctors.records()
    }

    /// Doctors registered under `clinic`, in directory order.
    pub fn doctors_for_clinic(&self, clinic: &str) -> Vec<&Doctor> {
        self.doctors
            .records()
            .iter()
            .filter(|d| d.clinic == clinic)
            .collect()
    }

    pub fn add_doctor(&mut self, name: &str, clinic: &str) -> StoreResult<Doctor> {
        let doctor = Doctor::new(name, clinic)?;
        self.doctors.insert(doctor.clone())?;
        log::info!("Added doctor '{}' at '{}'", doctor.name, doctor.clinic);
        Ok(doctor)
    }

    pub fn delete_doctor(&mut self, id: &RecordId) -> StoreResult<bool> {
        self.doctors.remove(id)
    }
}
