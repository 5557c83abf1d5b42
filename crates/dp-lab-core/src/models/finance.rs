//! Bookkeeping models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::dates::{format_record_date, parse_date_field, parse_record_date};
use super::money::parse_money;
use super::record::{RecordId, ValidationError};

/// Direction of a bookkeeping entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FinanceKind {
    /// Money received, e.g. a clinic payment
    Income,
    /// Money spent
    Expense,
}

impl FinanceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinanceKind::Income => "Income",
            FinanceKind::Expense => "Expense",
        }
    }
}

impl fmt::Display for FinanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FinanceKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(FinanceKind::Income),
            "expense" => Ok(FinanceKind::Expense),
            _ => Err(ValidationError::UnknownFinanceKind(s.to_string())),
        }
    }
}

/// An income or expense line. Amounts are stored positive for both kinds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinanceEntry {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    /// Clinic the entry is booked against; may be blank for general expenses
    #[serde(default)]
    pub clinic: String,
    pub kind: FinanceKind,
    #[serde(default)]
    pub description: String,
    pub amount: Decimal,
    /// Entry date as `dd/mm/yyyy` text
    pub date: String,
}

impl FinanceEntry {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_record_date(&self.date)
    }

    pub fn is_income(&self) -> bool {
        self.kind == FinanceKind::Income
    }
}

/// Finance form input as text fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FinanceInput {
    pub clinic: String,
    pub kind: FinanceKind,
    pub description: String,
    pub amount: String,
    pub date: String,
}

impl FinanceInput {
    pub fn into_entry(self, id: RecordId) -> Result<FinanceEntry, ValidationError> {
        let amount = parse_money("amount", &self.amount)?;
        let date = parse_date_field("date", &self.date)?;
        Ok(FinanceEntry {
            id,
            clinic: self.clinic.trim().to_string(),
            kind: self.kind,
            description: self.description.trim().to_string(),
            amount,
            date: format_record_date(date),
        })
    }
}
