//! Lab job models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::dates::{format_record_date, parse_date_field, parse_record_date};
use super::money::{ensure_non_negative, format_money, parse_count, parse_money};
use super::record::{require_text, RecordId, ValidationError};

/// Where a job is in the lab workflow.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum JobStatus {
    /// Received, not yet started
    #[default]
    Preparing,
    /// Waiting on the clinic or materials
    Pending,
    /// On the bench
    InProgress,
    /// Finished, not yet handed over
    Completed,
    /// Handed over to the clinic
    Delivered,
}

impl JobStatus {
    pub const ALL: [JobStatus; 5] = [
        JobStatus::Preparing,
        JobStatus::Pending,
        JobStatus::InProgress,
        JobStatus::Completed,
        JobStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Preparing => "Preparing",
            JobStatus::Pending => "Pending",
            JobStatus::InProgress => "InProgress",
            JobStatus::Completed => "Completed",
            JobStatus::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = ValidationError;

    /// Accepts `InProgress`, `in progress`, `in_progress` and so on.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str().to_lowercase() == key)
            .ok_or_else(|| ValidationError::UnknownStatus(s.to_string()))
    }
}

/// A prosthesis job received from a clinic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    /// Patient first name
    pub first_name: String,
    /// Patient last name
    #[serde(default)]
    pub last_name: String,
    /// Ordering clinic (by name)
    pub clinic: String,
    /// Ordering doctor (by name)
    #[serde(default)]
    pub doctor: String,
    /// Prosthesis type, matched against the price list
    pub prosthesis: String,
    /// Number of units
    pub count: u32,
    #[serde(default)]
    pub note: String,
    /// Job date as `dd/mm/yyyy` text
    pub date: String,
    /// Billed total, two places
    pub total_price: Decimal,
    #[serde(default)]
    pub status: JobStatus,
}

impl Job {
    /// Patient name as displayed and searched: "first last".
    pub fn patient_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The job date, or `None` when the stored text is not a valid date.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_record_date(&self.date)
    }

    /// Check the record-level invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("first name", &self.first_name)?;
        require_text("clinic", &self.clinic)?;
        require_text("prosthesis", &self.prosthesis)?;
        if self.count == 0 {
            return Err(ValidationError::CountTooSmall);
        }
        ensure_non_negative("total price", self.total_price)
    }

    /// Multi-line ticket text the host prints or encodes into a QR label.
    pub fn ticket_text(&self) -> String {
        format!(
            "Patient: {}\nClinic: {}\nDoctor: {}\nProsthesis: {}\nCount: {}\nDate: {}\nTotal: {}\nNote: {}",
            self.patient_name(),
            self.clinic,
            self.doctor,
            self.prosthesis,
            self.count,
            self.date,
            format_money(self.total_price),
            self.note,
        )
    }
}

/// Job form input as text fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobInput {
    pub first_name: String,
    pub last_name: String,
    pub clinic: String,
    pub doctor: String,
    pub prosthesis: String,
    pub count: String,
    pub note: String,
    pub date: String,
    /// Total entered by hand; blank means "quote from the price list"
    pub total_price: Option<String>,
    /// `None` means Preparing for a new job, unchanged for an edit
    pub status: Option<JobStatus>,
}

impl JobInput {
    /// Validate the form and build a job record.
    ///
    /// `quoted_total` is used when no total was entered by hand.
    pub fn into_job(
        self,
        id: RecordId,
        quoted_total: impl FnOnce(&str, &str, u32) -> Decimal,
    ) -> Result<Job, ValidationError> {
        let first_name = require_text("first name", &self.first_name)?;
        let clinic = require_text("clinic", &self.clinic)?;
        let prosthesis = require_text("prosthesis", &self.prosthesis)?;
        let count = parse_count(&self.count)?;
        let date = parse_date_field("date", &self.date)?;

        let total_price = match self.total_price.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => parse_money("total price", text)?,
            _ => quoted_total(&prosthesis, &clinic, count),
        };

        let job = Job {
            id,
            first_name,
            last_name: self.last_name.trim().to_string(),
            clinic,
            doctor: self.doctor.trim().to_string(),
            prosthesis,
            count,
            note: self.note.trim().to_string(),
            date: format_record_date(date),
            total_price,
            status: self.status.unwrap_or_default(),
        };
        job.validate()?;
        Ok(job)
    }
}
