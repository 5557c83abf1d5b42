//! Price resolution for prosthesis jobs.
//!
//! A clinic-specific price always wins over the general price list. Within a
//! scope the first matching entry is used; later duplicates are ignored.

use rust_decimal::Decimal;

use crate::models::money::{parse_count, round_money};
use crate::models::{PriceEntry, GENERAL_SCOPE};

/// Which scope a resolved price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    /// Clinic-specific override
    Clinic,
    /// The general price list
    General,
}

/// Result of quoting a job from form input.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    /// Resolved unit price, `None` when nothing applies
    pub unit_price: Option<Decimal>,
    pub source: Option<PriceSource>,
    /// Parsed count, `None` when the count text was not usable
    pub count: Option<u32>,
    /// Unit price times count, two places; zero when either part is missing
    pub total: Decimal,
}

/// Find the price entry that applies to `prosthesis` ordered by `clinic`.
pub fn resolve_price<'a>(
    prosthesis: &str,
    clinic: &str,
    prices: &'a [PriceEntry],
) -> Option<(&'a PriceEntry, PriceSource)> {
    let in_scope = move |scope: &str| {
        prices
            .iter()
            .find(|p| p.prosthesis == prosthesis && p.clinic == scope)
    };

    in_scope(clinic)
        .map(|p| (p, PriceSource::Clinic))
        .or_else(|| in_scope(GENERAL_SCOPE).map(|p| (p, PriceSource::General)))
}

/// Total for `count` units at `unit_price`; zero when no price applies.
pub fn compute_total(unit_price: Option<Decimal>, count: u32) -> Decimal {
    let Some(unit_price) = unit_price else {
        return round_money(Decimal::ZERO);
    };
    match unit_price.checked_mul(Decimal::from(count)) {
        Some(total) => round_money(total),
        None => {
            log::warn!("Total overflowed for unit price {} x {}", unit_price, count);
            round_money(Decimal::ZERO)
        }
    }
}

/// Total for a parsed count, resolving the unit price first.
pub fn total_for(prosthesis: &str, clinic: &str, count: u32, prices: &[PriceEntry]) -> Decimal {
    let unit_price = resolve_price(prosthesis, clinic, prices).map(|(p, _)| p.unit_price);
    compute_total(unit_price, count)
}

/// Quote a job from raw form text.
///
/// A count that is not a whole number of at least one yields a zero total
/// rather than an error, so the form can keep showing a price while typing.
pub fn quote(prosthesis: &str, clinic: &str, count_text: &str, prices: &[PriceEntry]) -> PriceQuote {
    let resolved = resolve_price(prosthesis, clinic, prices);
    let unit_price = resolved.map(|(p, _)| p.unit_price);
    let count = parse_count(count_text).ok();

    let total = match count {
        Some(count) => compute_total(unit_price, count),
        None => round_money(Decimal::ZERO),
    };

    PriceQuote {
        unit_price,
        source: resolved.map(|(_, source)| source),
        count,
        total,
    }
}

/// Distinct prosthesis types in the price list, in first-seen order.
pub fn prosthesis_types(prices: &[PriceEntry]) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();
    for entry in prices {
        if !types.contains(&entry.prosthesis) {
            types.push(entry.prosthesis.clone());
        }
    }
    types
}
