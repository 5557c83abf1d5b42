//! Bookkeeping entry filter.

use super::{non_blank, DateBounds, DateCheck, FilterOutcome};
use crate::models::{FinanceEntry, ValidationError};

/// Finance list criteria.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinanceCriteria {
    /// Exact clinic name
    pub clinic: Option<String>,
    pub dates: DateBounds,
}

impl FinanceCriteria {
    pub fn from_form(
        clinic: Option<String>,
        date_from: Option<&str>,
        date_to: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            clinic: non_blank(clinic),
            dates: DateBounds::from_text(date_from, date_to)?,
        })
    }
}

pub fn filter_finance_detailed(
    entries: &[FinanceEntry],
    criteria: &FinanceCriteria,
) -> FilterOutcome<FinanceEntry> {
    let mut outcome = FilterOutcome::default();

    for entry in entries {
        if let Some(clinic) = criteria.clinic.as_deref().filter(|c| !c.is_empty()) {
            if entry.clinic != clinic {
                continue;
            }
        }
        match criteria.dates.check(&entry.date) {
            DateCheck::Inside => outcome.matched.push(entry.clone()),
            DateCheck::Outside => {}
            DateCheck::Unreadable => {
                log::warn!(
                    "Finance entry {} has unreadable date '{}', excluded from date filter",
                    entry.id,
                    entry.date
                );
                outcome.unreadable_dates.push(entry.id.clone());
            }
        }
    }

    outcome
}

pub fn filter_finance(entries: &[FinanceEntry], criteria: &FinanceCriteria) -> Vec<FinanceEntry> {
    filter_finance_detailed(entries, criteria).matched
}
