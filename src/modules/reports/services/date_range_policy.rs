use chrono::{Datelike, Duration, NaiveDate};

use crate::core::{AppError, Result};
use crate::modules::reports::models::DateRange;

/// Requests on or before this day of the month report on the previous month
pub const DEFAULT_CLOSING_DAY: u32 = 5;

/// Default reporting window rule.
///
/// Early in a month people are closing out the previous month, so the window
/// is that whole month. Afterwards it is month-to-date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRangePolicy {
    closing_day: u32,
}

impl Default for DateRangePolicy {
    fn default() -> Self {
        Self {
            closing_day: DEFAULT_CLOSING_DAY,
        }
    }
}

impl DateRangePolicy {
    pub fn new(closing_day: u32) -> Result<Self> {
        if !(1..=28).contains(&closing_day) {
            return Err(AppError::configuration(format!(
                "closing day must be between 1 and 28, got {}",
                closing_day
            )));
        }

        Ok(Self { closing_day })
    }

    pub fn closing_day(&self) -> u32 {
        self.closing_day
    }

    pub fn resolve_default_range(&self, today: NaiveDate) -> DateRange {
        let month_start = first_of_month(today);

        if today.day() <= self.closing_day {
            let previous_month_end = month_start - Duration::days(1);
            DateRange::from_ordered(first_of_month(previous_month_end), previous_month_end)
        } else {
            DateRange::from_ordered(month_start, today)
        }
    }
}

/// Default window with the standard closing day
pub fn resolve_default_range(today: NaiveDate) -> DateRange {
    DateRangePolicy::default().resolve_default_range(today)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}
