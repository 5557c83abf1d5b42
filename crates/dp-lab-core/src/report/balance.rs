//! Clinic balance reconciliation and bookkeeping totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::revenue::clinic_revenue;
use crate::models::money::round_money;
use crate::models::{Clinic, FinanceEntry, FinanceKind, Job};

/// What a clinic was billed, what it paid, and what it still owes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicBalance {
    pub clinic: String,
    pub billed: Decimal,
    pub paid: Decimal,
    /// `billed - paid`; negative when the clinic has overpaid
    pub outstanding: Decimal,
}

/// Income, expense and net over a set of bookkeeping entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

/// Balance of every registered clinic, in directory order.
///
/// Clinics with no jobs still appear, billed at zero. Jobs and payments
/// booked against names missing from the directory are not reported here.
pub fn outstanding_balances(
    clinics: &[Clinic],
    jobs: &[Job],
    finance: &[FinanceEntry],
) -> Vec<ClinicBalance> {
    clinics
        .iter()
        .map(|clinic| {
            let billed = clinic_revenue(jobs, &clinic.name);
            let paid = round_money(
                finance
                    .iter()
                    .filter(|e| e.clinic == clinic.name && e.kind == FinanceKind::Income)
                    .map(|e| e.amount)
                    .sum(),
            );
            ClinicBalance {
                clinic: clinic.name.clone(),
                billed,
                paid,
                outstanding: round_money(billed - paid),
            }
        })
        .collect()
}

pub fn finance_totals(entries: &[FinanceEntry]) -> FinanceTotals {
    let (income, expense) = entries.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(income, expense), entry| match entry.kind {
            FinanceKind::Income => (income + entry.amount, expense),
            FinanceKind::Expense => (income, expense + entry.amount),
        },
    );
    FinanceTotals {
        income: round_money(income),
        expense: round_money(expense),
        net: round_money(income - expense),
    }
}
