//! Revenue aggregation over jobs.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::money::round_money;
use crate::models::Job;

/// Billed revenue of one clinic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicRevenue {
    pub clinic: String,
    pub total: Decimal,
}

/// Calendar month key, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl fmt::Display for YearMonth {
    /// Formats as `YYYY-MM`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Billed revenue of one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRevenue {
    pub month: YearMonth,
    pub total: Decimal,
}

/// Monthly revenue in ascending month order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub months: Vec<MonthRevenue>,
    /// Jobs left out because their date could not be parsed
    pub undated_jobs: usize,
}

/// Revenue per clinic name, in order of each clinic's first job.
pub fn revenue_by_clinic(jobs: &[Job]) -> Vec<ClinicRevenue> {
    let mut totals: Vec<ClinicRevenue> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for job in jobs {
        match index.get(job.clinic.as_str()).copied() {
            Some(i) => totals[i].total += job.total_price,
            None => {
                index.insert(job.clinic.as_str(), totals.len());
                totals.push(ClinicRevenue {
                    clinic: job.clinic.clone(),
                    total: job.total_price,
                });
            }
        }
    }

    for entry in &mut totals {
        entry.total = round_money(entry.total);
    }
    totals
}

/// Revenue per calendar month of the job date.
pub fn revenue_by_month(jobs: &[Job]) -> MonthlyRevenue {
    let mut totals: BTreeMap<YearMonth, Decimal> = BTreeMap::new();
    let mut undated_jobs = 0;

    for job in jobs {
        let Some(date) = job.parsed_date() else {
            log::debug!("Job {} has unreadable date '{}', left out of monthly revenue", job.id, job.date);
            undated_jobs += 1;
            continue;
        };
        let key = YearMonth {
            year: date.year(),
            month: date.month(),
        };
        *totals.entry(key).or_insert(Decimal::ZERO) += job.total_price;
    }

    MonthlyRevenue {
        months: totals
            .into_iter()
            .map(|(month, total)| MonthRevenue {
                month,
                total: round_money(total),
            })
            .collect(),
        undated_jobs,
    }
}

/// Billed revenue of a single clinic.
pub fn clinic_revenue(jobs: &[Job], clinic: &str) -> Decimal {
    round_money(
        jobs.iter()
            .filter(|job| job.clinic == clinic)
            .map(|job| job.total_price)
            .sum(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JobStatus, RecordId};

    fn job(clinic: &str, total: &str, date: &str) -> Job {
        Job {
            id: RecordId::generate(),
            first_name: "P".into(),
            last_name: String::new(),
            clinic: clinic.into(),
            doctor: String::new(),
            prosthesis: "Crown".into(),
            count: 1,
            note: String::new(),
            date: date.into(),
            total_price: total.parse().unwrap(),
            status: JobStatus::Preparing,
        }
    }

    #[test]
    fn test_revenue_by_clinic_first_seen_order() {
        let jobs = vec![
            job("B", "30.00", "01/01/2024"),
            job("A", "100.00", "01/01/2024"),
            job("B", "5.50", "01/01/2024"),
        ];
        let revenue = revenue_by_clinic(&jobs);
        assert_eq!(revenue.len(), 2);
        assert_eq!(revenue[0].clinic, "B");
        assert_eq!(revenue[0].total.to_string(), "35.50");
        assert_eq!(revenue[1].clinic, "A");
    }

    #[test]
    fn test_revenue_by_month_sorted_and_skips_bad_dates() {
        let jobs = vec![
            job("A", "10.00", "03/02/2024"),
            job("A", "20.00", "28/12/2023"),
            job("A", "5.00", "14/02/2024"),
            job("A", "99.00", "unknown"),
        ];
        let monthly = revenue_by_month(&jobs);
        let keys: Vec<String> = monthly.months.iter().map(|m| m.month.to_string()).collect();
        assert_eq!(keys, vec!["2023-12", "2024-02"]);
        assert_eq!(monthly.months[1].total.to_string(), "15.00");
        assert_eq!(monthly.undated_jobs, 1);
    }

    #[test]
    fn test_empty_jobs() {
        assert!(revenue_by_clinic(&[]).is_empty());
        assert!(revenue_by_month(&[]).months.is_empty());
    }

    #[test]
    fn test_clinic_revenue() {
        let jobs = vec![job("A", "1.10", "01/01/2024"), job("B", "2.00", "01/01/2024")];
        assert_eq!(clinic_revenue(&jobs, "A").to_string(), "1.10");
        assert_eq!(clinic_revenue(&jobs, "C").to_string(), "0.00");
    }
}
