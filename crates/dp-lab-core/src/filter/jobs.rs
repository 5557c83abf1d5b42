//! Job list filter.

use rust_decimal::Decimal;

use super::{non_blank, DateBounds, DateCheck, FilterOutcome};
use crate::models::{Job, ValidationError};

/// Job list criteria. Every set criterion must hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobCriteria {
    /// Case-sensitive substring of the clinic name
    pub clinic: Option<String>,
    /// Case-sensitive substring of the doctor name
    pub doctor: Option<String>,
    /// Case-insensitive substring of "first last"
    pub name: Option<String>,
    pub dates: DateBounds,
}

impl JobCriteria {
    /// Build criteria from filter form text. Malformed date bounds are rejected.
    pub fn from_form(
        clinic: Option<String>,
        doctor: Option<String>,
        name: Option<String>,
        date_from: Option<&str>,
        date_to: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            clinic: non_blank(clinic),
            doctor: non_blank(doctor),
            name: non_blank(name),
            dates: DateBounds::from_text(date_from, date_to)?,
        })
    }

    fn matches_text(&self, job: &Job) -> bool {
        if let Some(clinic) = self.clinic.as_deref().filter(|c| !c.is_empty()) {
            if !job.clinic.contains(clinic) {
                return false;
            }
        }
        if let Some(doctor) = self.doctor.as_deref().filter(|d| !d.is_empty()) {
            if !job.doctor.contains(doctor) {
                return false;
            }
        }
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            let full_name = job.patient_name().to_lowercase();
            if !full_name.contains(&name.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// Filter jobs, reporting records skipped for unreadable dates.
pub fn filter_jobs_detailed(jobs: &[Job], criteria: &JobCriteria) -> FilterOutcome<Job> {
    let mut outcome = FilterOutcome::default();

    for job in jobs {
        if !criteria.matches_text(job) {
            continue;
        }
        match criteria.dates.check(&job.date) {
            DateCheck::Inside => outcome.matched.push(job.clone()),
            DateCheck::Outside => {}
            DateCheck::Unreadable => {
                log::warn!("Job {} has unreadable date '{}', excluded from date filter", job.id, job.date);
                outcome.unreadable_dates.push(job.id.clone());
            }
        }
    }

    outcome
}

/// Filter jobs, preserving their order.
pub fn filter_jobs(jobs: &[Job], criteria: &JobCriteria) -> Vec<Job> {
    filter_jobs_detailed(jobs, criteria).matched
}

/// Sum of billed totals over a job sequence.
pub fn total_revenue(jobs: &[Job]) -> Decimal {
    jobs.iter().map(|job| job.total_price).sum()
}
