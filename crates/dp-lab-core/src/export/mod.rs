//! Spreadsheet-friendly CSV and JSON exports of lists and reports.
//!
//! Exports borrow the sequences they render and never modify them.

mod records;
mod reports;

pub use records::*;
pub use reports::*;

/// Export timestamp in local time.
pub(crate) fn exported_at() -> String {
    chrono::Local::now().to_rfc3339()
}

/// Escape a string for CSV output.
pub(crate) fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
