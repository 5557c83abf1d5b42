//! Calendar dates as they appear in records: `dd/mm/yyyy`.

use chrono::{Local, NaiveDate};

use super::ValidationError;

/// Format used for every date stored in a record file.
pub const RECORD_DATE_FORMAT: &str = "%d/%m/%Y";

/// Parse stored date text. `None` means the text is not a readable date.
pub fn parse_record_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), RECORD_DATE_FORMAT).ok()
}

pub fn format_record_date(date: NaiveDate) -> String {
    date.format(RECORD_DATE_FORMAT).to_string()
}

/// Today's date in record format, the default for new entries.
pub fn today_text() -> String {
    format_record_date(Local::now().date_naive())
}

/// Parse a required date from form input.
pub fn parse_date_field(field: &'static str, text: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    parse_record_date(trimmed).ok_or_else(|| ValidationError::InvalidDate {
        field,
        value: trimmed.to_string(),
    })
}

/// Parse an optional date from form input. Blank text means "not set".
pub fn parse_optional_date(
    field: &'static str,
    text: Option<&str>,
) -> Result<Option<NaiveDate>, ValidationError> {
    match text.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date_field(field, value).map(Some),
    }
}

/// Normalize optional date text to record format, keeping blank as blank.
pub fn normalize_optional_date(field: &'static str, text: &str) -> Result<String, ValidationError> {
    Ok(parse_optional_date(field, Some(text))?
        .map(format_record_date)
        .unwrap_or_default())
}
