//! Clinic and doctor directory models.

use serde::{Deserialize, Serialize};

use super::record::{require_text, RecordId, ValidationError};

/// A client clinic. Names are unique within the directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Clinic {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    pub name: String,
}

impl Clinic {
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: RecordId::generate(),
            name: require_text("clinic name", name)?,
        })
    }
}

/// A doctor working at a clinic. The clinic link is by name only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    pub name: String,
    pub clinic: String,
}

impl Doctor {
    pub fn new(name: &str, clinic: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: RecordId::generate(),
            name: require_text("doctor name", name)?,
            clinic: require_text("clinic", clinic)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clinic_trims_name() {
        let clinic = Clinic::new("  Smile Dental ").unwrap();
        assert_eq!(clinic.name, "Smile Dental");
    }

    #[test]
    fn test_doctor_requires_clinic() {
        assert_eq!(
            Doctor::new("Dr. Kaya", ""),
            Err(ValidationError::EmptyField("clinic"))
        );
    }
}
