// Property-based tests for the default reporting window

use chrono::{Datelike, Duration, NaiveDate};
use proptest::prelude::*;
use reportdesk::reports::services::{resolve_default_range, DateRangePolicy};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Any valid calendar date between 1990 and 2099
fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..40_000).prop_map(|offset| date(1990, 1, 1) + Duration::days(offset))
}

/// Valid dates whose day of month falls in `days`
fn date_with_day(days: std::ops::RangeInclusive<u32>) -> impl Strategy<Value = NaiveDate> {
    (1990i32..2100, 1u32..=12, days)
        .prop_filter_map("valid calendar date", |(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1).unwrap() - Duration::days(1)
}

#[test]
fn test_closing_window_scenario() {
    let range = resolve_default_range(date(2024, 3, 3));
    assert_eq!(range.start(), date(2024, 2, 1));
    assert_eq!(range.end(), date(2024, 2, 29));
}

#[test]
fn test_month_to_date_scenario() {
    let range = resolve_default_range(date(2024, 3, 20));
    assert_eq!(range.start(), date(2024, 3, 1));
    assert_eq!(range.end(), date(2024, 3, 20));
}

#[test]
fn test_non_leap_february() {
    let range = resolve_default_range(date(2023, 3, 1));
    assert_eq!(range.end(), date(2023, 2, 28));
}

proptest! {
    /// Days 1-5: the whole previous calendar month
    #[test]
    fn prop_early_days_cover_previous_month(today in date_with_day(1..=5)) {
        let range = resolve_default_range(today);
        let previous_month_end = date(today.year(), today.month(), 1) - Duration::days(1);

        prop_assert_eq!(range.start().day(), 1);
        prop_assert_eq!(range.start().month(), previous_month_end.month());
        prop_assert_eq!(range.start().year(), previous_month_end.year());
        prop_assert_eq!(range.end(), previous_month_end);
        prop_assert_eq!(range.end(), last_day_of_month(range.start()));
    }

    /// Days 6-31: first of this month through today
    #[test]
    fn prop_later_days_are_month_to_date(today in date_with_day(6..=31)) {
        let range = resolve_default_range(today);

        prop_assert_eq!(range.start(), date(today.year(), today.month(), 1));
        prop_assert_eq!(range.end(), today);
    }

    /// Same input, same output; start never after end
    #[test]
    fn prop_pure_and_ordered(today in any_date()) {
        let first = resolve_default_range(today);
        let second = resolve_default_range(today);

        prop_assert_eq!(first, second);
        prop_assert!(first.start() <= first.end());
        prop_assert!(first.end() <= today);
    }

    /// The closing day is the only switch point
    #[test]
    fn prop_custom_closing_day(today in any_date(), closing_day in 1u32..=28) {
        let policy = DateRangePolicy::new(closing_day).unwrap();
        let range = policy.resolve_default_range(today);

        if today.day() <= closing_day {
            prop_assert!(range.end() < date(today.year(), today.month(), 1));
        } else {
            prop_assert_eq!(range.end(), today);
        }
    }
}
