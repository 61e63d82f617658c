use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::core::{AppError, Result};

/// Source of the reporting calendar date.
///
/// Reports are bucketed by calendar day in the business timezone, not UTC,
/// so "today" must be taken through the configured offset.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock shifted into the reporting timezone
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Build from a whole-hour UTC offset (e.g. 7 for UTC+7)
    pub fn from_offset_hours(hours: i32) -> Result<Self> {
        Ok(Self::new(reporting_offset(hours)?))
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        to_reporting_date(Utc::now(), self.offset)
    }
}

/// Clock pinned to one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Convert a whole-hour offset into a `FixedOffset`, rejecting values outside -12..=14
pub fn reporting_offset(hours: i32) -> Result<FixedOffset> {
    if !(-12..=14).contains(&hours) {
        return Err(AppError::configuration(format!(
            "Reporting UTC offset out of range: {} (expected -12..=14)",
            hours
        )));
    }

    FixedOffset::east_opt(hours * 3600)
        .ok_or_else(|| AppError::configuration(format!("Invalid UTC offset: {}", hours)))
}

/// Calendar date of a UTC instant as seen in the reporting timezone
pub fn to_reporting_date(utc_time: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    utc_time.with_timezone(&offset).date_naive()
}
