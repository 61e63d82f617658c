use chrono::{Datelike, Duration, NaiveDate};
use std::sync::Arc;

use crate::core::Result;
use crate::modules::reports::models::ReportOverview;
use crate::modules::reports::repositories::ReportRepository;

/// Landing page figures: orders opened this week, month and year
pub struct OverviewService {
    repo: Arc<dyn ReportRepository>,
}

impl OverviewService {
    pub fn new(repo: Arc<dyn ReportRepository>) -> Self {
        Self { repo }
    }

    pub async fn overview(&self, today: NaiveDate) -> Result<ReportOverview> {
        let (week, month, year) = period_starts(today);

        Ok(ReportOverview {
            orders_opened_this_week: self.repo.opened_orders(&iso(week)).await?,
            orders_opened_this_month: self.repo.opened_orders(&iso(month)).await?,
            orders_opened_this_year: self.repo.opened_orders(&iso(year)).await?,
        })
    }
}

/// Monday of the current week, first of the month, first of the year
pub fn period_starts(today: NaiveDate) -> (NaiveDate, NaiveDate, NaiveDate) {
    let week = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    let month = today - Duration::days(i64::from(today.day0()));
    let year = today - Duration::days(i64::from(today.ordinal0()));

    (week, month, year)
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
