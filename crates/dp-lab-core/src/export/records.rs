//! Job list and bookkeeping list exports.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{escape_csv, exported_at};
use crate::filter::total_revenue;
use crate::models::money::format_money;
use crate::models::{FinanceEntry, Job};
use crate::report::{finance_totals, FinanceTotals};

/// A job list as shown in the jobs view, with its revenue footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListExport {
    /// Export timestamp
    pub exported_at: String,
    pub jobs: Vec<Job>,
    /// Sum of all job totals
    pub total: Decimal,
}

impl JobListExport {
    pub fn from_jobs(jobs: &[Job]) -> Self {
        Self {
            exported_at: exported_at(),
            jobs: jobs.to_vec(),
            total: total_revenue(jobs),
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format. The last row carries the total.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        csv.push_str("first_name,last_name,clinic,doctor,prosthesis,count,note,date,total_price,status\n");

        for job in &self.jobs {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{}\n",
                escape_csv(&job.first_name),
                escape_csv(&job.last_name),
                escape_csv(&job.clinic),
                escape_csv(&job.doctor),
                escape_csv(&job.prosthesis),
                job.count,
                escape_csv(&job.note),
                escape_csv(&job.date),
                format_money(job.total_price),
                job.status,
            ));
        }

        csv.push_str(&format!("Total,,,,,,,,{},\n", format_money(self.total)));
        csv
    }
}

/// A bookkeeping list with income, expense and net footers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceListExport {
    pub exported_at: String,
    pub entries: Vec<FinanceEntry>,
    pub totals: FinanceTotals,
}

impl FinanceListExport {
    pub fn from_entries(entries: &[FinanceEntry]) -> Self {
        Self {
            exported_at: exported_at(),
            entries: entries.to_vec(),
            totals: finance_totals(entries),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        csv.push_str("clinic,kind,description,amount,date\n");

        for entry in &self.entries {
            csv.push_str(&format!(
                "{},{},{},{},{}\n",
                escape_csv(&entry.clinic),
                entry.kind,
                escape_csv(&entry.description),
                format_money(entry.amount),
                escape_csv(&entry.date),
            ));
        }

        csv.push_str(&format!("Income,,,{},\n", format_money(self.totals.income)));
        csv.push_str(&format!("Expense,,,{},\n", format_money(self.totals.expense)));
        csv.push_str(&format!("Net,,,{},\n", format_money(self.totals.net)));
        csv
    }
}
