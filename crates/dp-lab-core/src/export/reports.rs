//! Report export.

use serde::{Deserialize, Serialize};

use super::{escape_csv, exported_at};
use crate::models::money::format_money;
use crate::report::LabReport;

/// All reports over one snapshot, ready for a spreadsheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportExport {
    pub exported_at: String,
    pub report: LabReport,
}

impl ReportExport {
    pub fn from_report(report: &LabReport) -> Self {
        Self {
            exported_at: exported_at(),
            report: report.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV: one section per report, separated by a blank line.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        if !self.report.unavailable.is_empty() {
            csv.push_str(&format!(
                "Unavailable collections,{}\n\n",
                escape_csv(&self.report.unavailable.join(" "))
            ));
        }

        csv.push_str("Revenue by clinic\nclinic,total\n");
        for row in &self.report.revenue_by_clinic {
            csv.push_str(&format!("{},{}\n", escape_csv(&row.clinic), format_money(row.total)));
        }

        csv.push_str("\nRevenue by month\nmonth,total\n");
        for row in &self.report.revenue_by_month.months {
            csv.push_str(&format!("{},{}\n", row.month, format_money(row.total)));
        }
        if self.report.revenue_by_month.undated_jobs > 0 {
            csv.push_str(&format!(
                "Undated jobs,{}\n",
                self.report.revenue_by_month.undated_jobs
            ));
        }

        csv.push_str("\nOutstanding balances\nclinic,billed,paid,outstanding\n");
        for row in &self.report.balances {
            csv.push_str(&format!(
                "{},{},{},{}\n",
                escape_csv(&row.clinic),
                format_money(row.billed),
                format_money(row.paid),
                format_money(row.outstanding),
            ));
        }

        csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ClinicBalance, ClinicRevenue, MonthRevenue, MonthlyRevenue, YearMonth};
    use rust_decimal::Decimal;

    fn sample() -> LabReport {
        LabReport {
            revenue_by_clinic: vec![ClinicRevenue {
                clinic: "A".into(),
                total: Decimal::new(15000, 2),
            }],
            revenue_by_month: MonthlyRevenue {
                months: vec![MonthRevenue {
                    month: YearMonth { year: 2024, month: 1 },
                    total: Decimal::new(15000, 2),
                }],
                undated_jobs: 1,
            },
            balances: vec![ClinicBalance {
                clinic: "A".into(),
                billed: Decimal::new(15000, 2),
                paid: Decimal::new(8000, 2),
                outstanding: Decimal::new(7000, 2),
            }],
            unavailable: Vec::new(),
        }
    }

    #[test]
    fn test_report_csv_sections() {
        let csv = ReportExport::from_report(&sample()).to_csv();
        assert!(csv.starts_with("Revenue by clinic\nclinic,total\nA,150.00\n"));
        assert!(csv.contains("2024-01,150.00\nUndated jobs,1\n"));
        assert!(csv.ends_with("A,150.00,80.00,70.00\n"));
    }

    #[test]
    fn test_report_csv_names_unavailable_collections() {
        let mut report = sample();
        report.unavailable = vec!["finance".into()];
        let csv = ReportExport::from_report(&report).to_csv();
        assert!(csv.starts_with("Unavailable collections,finance\n\nRevenue by clinic\n"));

        let json = ReportExport::from_report(&report).to_json().unwrap();
        let parsed: ReportExport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.report.unavailable, vec!["finance".to_string()]);
    }

    #[test]
    fn test_report_json_round_trips() {
        let report = sample();
        let json = ReportExport::from_report(&report).to_json().unwrap();
        let parsed: ReportExport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.report, report);
    }
}
