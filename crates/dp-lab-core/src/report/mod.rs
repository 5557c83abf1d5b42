//! Derived reports: revenue per clinic and month, clinic balances.
//!
//! Every report is recomputed from the snapshot it is given. Nothing is
//! cached between calls.

mod balance;
mod revenue;

pub use balance::*;
pub use revenue::*;

use serde::{Deserialize, Serialize};

use crate::models::{Clinic, FinanceEntry, Job};

/// All reports over one snapshot of the collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabReport {
    pub revenue_by_clinic: Vec<ClinicRevenue>,
    pub revenue_by_month: MonthlyRevenue,
    pub balances: Vec<ClinicBalance>,
    /// Collections that could not be read and were counted as empty.
    /// Figures depending on them are not reliable while this is non-empty.
    #[serde(default)]
    pub unavailable: Vec<String>,
}

impl LabReport {
    pub fn build(clinics: &[Clinic], jobs: &[Job], finance: &[FinanceEntry]) -> Self {
        Self {
            revenue_by_clinic: revenue_by_clinic(jobs),
            revenue_by_month: revenue_by_month(jobs),
            balances: outstanding_balances(clinics, jobs, finance),
            unavailable: Vec::new(),
        }
    }
}
