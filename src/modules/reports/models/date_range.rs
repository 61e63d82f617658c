use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::core::{AppError, Result};

const ISO_DATE: &str = "%Y-%m-%d";

/// Inclusive calendar-date window a report aggregates over.
///
/// Fields are private so `start <= end` holds for every value in existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    #[serde(rename = "start_date")]
    start: NaiveDate,
    #[serde(rename = "end_date")]
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(AppError::validation(format!(
                "start_date ({}) must be before or equal to end_date ({})",
                start, end
            )));
        }

        Ok(Self { start, end })
    }

    /// For callers that derive both ends from one date and cannot invert them
    pub(crate) fn from_ordered(start: NaiveDate, end: NaiveDate) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Start date as handed to collaborators (`YYYY-MM-DD`)
    pub fn start_iso(&self) -> String {
        self.start.format(ISO_DATE).to_string()
    }

    /// End date as handed to collaborators (`YYYY-MM-DD`)
    pub fn end_iso(&self) -> String {
        self.end.format(ISO_DATE).to_string()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, both ends included
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start_iso(), self.end_iso())
    }
}
