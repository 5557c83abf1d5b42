//! Predicate filters over job and finance snapshots.
//!
//! Filters are pure functions over borrowed records. They never abort on a
//! record whose stored date cannot be read: such a record is left out of any
//! date-bounded result and reported in [`FilterOutcome::unreadable_dates`].

mod finance;
mod jobs;

pub use finance::*;
pub use jobs::*;

use chrono::NaiveDate;

use crate::models::dates::{parse_optional_date, parse_record_date};
use crate::models::{RecordId, ValidationError};

/// Inclusive calendar date range. Either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateBounds {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// How a record date relates to a [`DateBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateCheck {
    Inside,
    Outside,
    /// A bound is set but the record date could not be parsed
    Unreadable,
}

impl DateBounds {
    /// Parse bounds from form text; blank text leaves that end open.
    pub fn from_text(from: Option<&str>, to: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            from: parse_optional_date("start date", from)?,
            to: parse_optional_date("end date", to)?,
        })
    }

    pub fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Check stored date text against the bounds.
    pub fn check(&self, date_text: &str) -> DateCheck {
        if self.is_open() {
            return DateCheck::Inside;
        }
        let Some(date) = parse_record_date(date_text) else {
            return DateCheck::Unreadable;
        };
        let after_start = self.from.map_or(true, |from| date >= from);
        let before_end = self.to.map_or(true, |to| date <= to);
        if after_start && before_end {
            DateCheck::Inside
        } else {
            DateCheck::Outside
        }
    }
}

/// Filter result with the records skipped for unreadable dates.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome<T> {
    pub matched: Vec<T>,
    /// Records excluded because their date could not be parsed
    pub unreadable_dates: Vec<RecordId>,
}

impl<T> Default for FilterOutcome<T> {
    fn default() -> Self {
        Self {
            matched: Vec::new(),
            unreadable_dates: Vec::new(),
        }
    }
}

/// Treat blank criteria text the same as an absent criterion.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
