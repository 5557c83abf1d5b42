//! Record identity and field validation shared by every entity.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable identifier assigned to a record when it is created.
///
/// Edits and deletes are keyed on this value, never on list position or
/// full-value equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh UUID-backed identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rejected form input. Nothing is mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    EmptyField(&'static str),

    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} must be a dd/mm/yyyy date, got '{value}'")]
    InvalidDate { field: &'static str, value: String },

    #[error("{0} cannot be negative")]
    Negative(&'static str),

    #[error("count must be at least 1")]
    CountTooSmall,

    #[error("clinic '{0}' already exists")]
    DuplicateClinic(String),

    #[error("unknown job status '{0}'")]
    UnknownStatus(String),

    #[error("unknown finance entry kind '{0}'")]
    UnknownFinanceKind(String),
}

/// Trim a required text field, rejecting it when nothing is left.
pub fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = RecordId::generate();
        let b = RecordId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36); // UUID format
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = RecordId::from("job-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"job-1\"");
    }

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("name", "  Ada ").unwrap(), "Ada");
        assert_eq!(
            require_text("name", "   "),
            Err(ValidationError::EmptyField("name"))
        );
    }
}
