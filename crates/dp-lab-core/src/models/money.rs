//! Two-place decimal money helpers.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use super::ValidationError;

/// Round to two decimal places, always carrying a scale of exactly two.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Render an amount the way it is shown and stored: `1000.00`.
pub fn format_money(value: Decimal) -> String {
    round_money(value).to_string()
}

/// Parse a non-negative decimal from form text.
pub fn parse_decimal(field: &'static str, text: &str) -> Result<Decimal, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    let value = Decimal::from_str(trimmed).map_err(|_| ValidationError::InvalidNumber {
        field,
        value: trimmed.to_string(),
    })?;
    ensure_non_negative(field, value)?;
    Ok(value)
}

/// Reject a stored amount below zero.
pub fn ensure_non_negative(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::Negative(field));
    }
    Ok(())
}

/// Parse a non-negative money amount, rounded to two places.
pub fn parse_money(field: &'static str, text: &str) -> Result<Decimal, ValidationError> {
    parse_decimal(field, text).map(round_money)
}

/// Parse a unit count. Counts are whole numbers of at least one.
pub fn parse_count(text: &str) -> Result<u32, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField("count"));
    }
    let count: u32 = trimmed.parse().map_err(|_| ValidationError::InvalidNumber {
        field: "count",
        value: trimmed.to_string(),
    })?;
    if count == 0 {
        return Err(ValidationError::CountTooSmall);
    }
    Ok(count)
}
