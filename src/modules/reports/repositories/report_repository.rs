use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::MySqlPool;
use std::future::Future;
use std::time::Duration;

use crate::core::error::AppError;
use crate::modules::reports::models::{Category, LabeledValue, Series, SeriesBundle};

/// Data sources behind the reports.
///
/// Dates are ISO-8601 calendar dates (`YYYY-MM-DD`), both ends inclusive.
/// Implementations own their timeouts and retries; a failure here surfaces
/// to the caller as an internal error.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Number of orders opened on or after `since`
    async fn opened_orders(&self, since: &str) -> Result<u64, AppError>;

    /// Order totals per month (`start_month..=end_month`), one series per year
    async fn monthly_year_over_year(
        &self,
        years: &[i32],
        start_month: u32,
        end_month: u32,
    ) -> Result<SeriesBundle, AppError>;

    /// Orders per sales rep, one series per order metric
    async fn sales_rep_orders(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<SeriesBundle, AppError>;

    /// Orders per day, one series per payment status
    async fn orders_payment_status(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<SeriesBundle, AppError>;

    /// Registered agent orders per state
    async fn registered_agent_by_state(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<LabeledValue>, AppError>;

    /// Registered agent orders per payment status
    async fn registered_agent_payment_status(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<LabeledValue>, AppError>;

    /// Orders per service type
    async fn order_service_types(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<LabeledValue>, AppError>;
}

// Pre-aggregated reporting views. Each exposes (day, category, series, value)
// or (day, label, value); the aggregation itself lives in the database.
const VIEW_SALES_REP_ORDERS: &str = "report_sales_rep_orders";
const VIEW_ORDERS_PAYMENT_STATUS: &str = "report_orders_payment_status";
const VIEW_REGISTERED_AGENT_BY_STATE: &str = "report_registered_agent_by_state";
const VIEW_REGISTERED_AGENT_PAYMENT_STATUS: &str = "report_registered_agent_payment_status";
const VIEW_ORDER_SERVICE_TYPES: &str = "report_order_service_types";
const VIEW_MONTHLY_ORDERS: &str = "report_monthly_orders";

pub struct MySqlReportRepository {
    pool: MySqlPool,
    query_timeout: Duration,
}

impl MySqlReportRepository {
    pub fn new(pool: MySqlPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    async fn bounded<T, F>(&self, query: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(result) => result.map_err(AppError::Database),
            Err(_) => Err(AppError::internal(format!(
                "report query timed out after {:?}",
                self.query_timeout
            ))),
        }
    }

    async fn fetch_series(
        &self,
        view: &'static str,
        start_date: &str,
        end_date: &str,
    ) -> Result<SeriesBundle, AppError> {
        let sql = format!(
            "SELECT category, series, CAST(SUM(value) AS DECIMAL(20, 2)) AS total \
             FROM {} WHERE day BETWEEN ? AND ? \
             GROUP BY category, series ORDER BY MIN(day), category, series",
            view
        );

        let rows = self
            .bounded(
                sqlx::query_as::<_, (String, String, Decimal)>(&sql)
                    .bind(start_date)
                    .bind(end_date)
                    .fetch_all(&self.pool),
            )
            .await?;

        pivot_rows(rows)
    }

    async fn fetch_values(
        &self,
        view: &'static str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<LabeledValue>, AppError> {
        let sql = format!(
            "SELECT label, CAST(SUM(value) AS DECIMAL(20, 2)) AS total \
             FROM {} WHERE day BETWEEN ? AND ? \
             GROUP BY label ORDER BY total DESC, label",
            view
        );

        let rows = self
            .bounded(
                sqlx::query_as::<_, (String, Decimal)>(&sql)
                    .bind(start_date)
                    .bind(end_date)
                    .fetch_all(&self.pool),
            )
            .await?;

        Ok(rows
            .into_iter()
            .map(|(label, value)| LabeledValue::new(label, value))
            .collect())
    }
}

#[async_trait]
impl ReportRepository for MySqlReportRepository {
    async fn opened_orders(&self, since: &str) -> Result<u64, AppError> {
        let count: i64 = self
            .bounded(
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE created_at >= ?")
                    .bind(since)
                    .fetch_one(&self.pool),
            )
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn monthly_year_over_year(
        &self,
        years: &[i32],
        start_month: u32,
        end_month: u32,
    ) -> Result<SeriesBundle, AppError> {
        let (Some(&first), Some(&last)) = (years.iter().min(), years.iter().max()) else {
            return SeriesBundle::new(month_categories(start_month, end_month), vec![]);
        };

        let sql = format!(
            "SELECT CAST(YEAR(day) AS SIGNED) AS year, CAST(MONTH(day) AS SIGNED) AS month, \
             CAST(SUM(value) AS DECIMAL(20, 2)) AS total \
             FROM {} WHERE YEAR(day) BETWEEN ? AND ? AND MONTH(day) BETWEEN ? AND ? \
             GROUP BY year, month",
            VIEW_MONTHLY_ORDERS
        );

        let rows = self
            .bounded(
                sqlx::query_as::<_, (i64, i64, Decimal)>(&sql)
                    .bind(first)
                    .bind(last)
                    .bind(start_month)
                    .bind(end_month)
                    .fetch_all(&self.pool),
            )
            .await?;

        pivot_monthly(years, start_month, end_month, &rows)
    }

    async fn sales_rep_orders(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<SeriesBundle, AppError> {
        self.fetch_series(VIEW_SALES_REP_ORDERS, start_date, end_date)
            .await
    }

    async fn orders_payment_status(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<SeriesBundle, AppError> {
        self.fetch_series(VIEW_ORDERS_PAYMENT_STATUS, start_date, end_date)
            .await
    }

    async fn registered_agent_by_state(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<LabeledValue>, AppError> {
        self.fetch_values(VIEW_REGISTERED_AGENT_BY_STATE, start_date, end_date)
            .await
    }

    async fn registered_agent_payment_status(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<LabeledValue>, AppError> {
        self.fetch_values(VIEW_REGISTERED_AGENT_PAYMENT_STATUS, start_date, end_date)
            .await
    }

    async fn order_service_types(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<LabeledValue>, AppError> {
        self.fetch_values(VIEW_ORDER_SERVICE_TYPES, start_date, end_date)
            .await
    }
}

fn month_categories(start_month: u32, end_month: u32) -> Vec<Category> {
    (start_month..=end_month).map(Category::Month).collect()
}

/// Turn `(category, series, value)` rows into a bundle.
///
/// Categories and series keep first-seen order; a missing cell is zero.
pub fn pivot_rows(rows: Vec<(String, String, Decimal)>) -> Result<SeriesBundle, AppError> {
    let mut categories: Vec<String> = Vec::new();
    let mut names: Vec<String> = Vec::new();

    for (category, series, _) in &rows {
        if !categories.contains(category) {
            categories.push(category.clone());
        }
        if !names.contains(series) {
            names.push(series.clone());
        }
    }

    let mut grid = vec![vec![Decimal::ZERO; categories.len()]; names.len()];
    for (category, series, value) in rows {
        let column = categories.iter().position(|c| *c == category);
        let row = names.iter().position(|s| *s == series);
        if let (Some(row), Some(column)) = (row, column) {
            grid[row][column] += value;
        }
    }

    let series = names
        .into_iter()
        .zip(grid)
        .map(|(name, data)| Series::new(name, data))
        .collect();

    SeriesBundle::new(categories.into_iter().map(Category::Label).collect(), series)
}

/// Lay `(year, month, value)` rows onto a months-by-years grid, zero-filled
pub fn pivot_monthly(
    years: &[i32],
    start_month: u32,
    end_month: u32,
    rows: &[(i64, i64, Decimal)],
) -> Result<SeriesBundle, AppError> {
    if start_month == 0 || end_month > 12 || start_month > end_month {
        return Err(AppError::validation(format!(
            "invalid month window {}..={}",
            start_month, end_month
        )));
    }

    let width = (end_month - start_month + 1) as usize;
    let series = years
        .iter()
        .map(|&year| {
            let mut data = vec![Decimal::ZERO; width];
            for &(row_year, month, value) in rows {
                let in_window = month >= i64::from(start_month) && month <= i64::from(end_month);
                if row_year == i64::from(year) && in_window {
                    data[(month - i64::from(start_month)) as usize] += value;
                }
            }
            Series::new(year.to_string(), data)
        })
        .collect();

    SeriesBundle::new(month_categories(start_month, end_month), series)
}
