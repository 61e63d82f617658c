// In-memory report repository
//
// Returns canned data and records every call with the date arguments it got.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Mutex;

use reportdesk::core::AppError;
use reportdesk::reports::models::{Category, LabeledValue, Series, SeriesBundle};
use reportdesk::reports::repositories::report_repository::pivot_monthly;
use reportdesk::reports::ReportRepository;

#[derive(Default)]
pub struct InMemoryReportRepository {
    /// `(year, month, value)` rows for the year-over-year report
    pub monthly_rows: Vec<(i64, i64, Decimal)>,
    pub opened_orders: u64,
    /// When set, every call fails with this message
    pub fail_with: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn with_monthly_rows(mut self, rows: Vec<(i64, i64, Decimal)>) -> Self {
        self.monthly_rows = rows;
        self
    }

    pub fn with_opened_orders(mut self, count: u64) -> Self {
        self.opened_orders = count;
        self
    }

    /// Calls seen so far, formatted as `name(arg, ...)`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: String) -> Result<(), AppError> {
        self.calls.lock().expect("calls lock").push(call);

        match &self.fail_with {
            Some(message) => Err(AppError::internal(message.clone())),
            None => Ok(()),
        }
    }

    fn breakdown() -> Vec<LabeledValue> {
        vec![
            LabeledValue::new("paid", Decimal::from(12)),
            LabeledValue::new("unpaid", Decimal::from(3)),
        ]
    }

    fn bundle() -> SeriesBundle {
        SeriesBundle::new(
            vec![Category::label("alice"), Category::label("bob")],
            vec![Series::new("orders", vec![Decimal::from(5), Decimal::from(2)])],
        )
        .expect("aligned test bundle")
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn opened_orders(&self, since: &str) -> Result<u64, AppError> {
        self.record(format!("opened_orders({})", since))?;
        Ok(self.opened_orders)
    }

    async fn monthly_year_over_year(
        &self,
        years: &[i32],
        start_month: u32,
        end_month: u32,
    ) -> Result<SeriesBundle, AppError> {
        self.record(format!(
            "monthly_year_over_year({:?}, {}, {})",
            years, start_month, end_month
        ))?;
        pivot_monthly(years, start_month, end_month, &self.monthly_rows)
    }

    async fn sales_rep_orders(&self, start: &str, end: &str) -> Result<SeriesBundle, AppError> {
        self.record(format!("sales_rep_orders({}, {})", start, end))?;
        Ok(Self::bundle())
    }

    async fn orders_payment_status(
        &self,
        start: &str,
        end: &str,
    ) -> Result<SeriesBundle, AppError> {
        self.record(format!("orders_payment_status({}, {})", start, end))?;
        Ok(Self::bundle())
    }

    async fn registered_agent_by_state(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<LabeledValue>, AppError> {
        self.record(format!("registered_agent_by_state({}, {})", start, end))?;
        Ok(Self::breakdown())
    }

    async fn registered_agent_payment_status(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<LabeledValue>, AppError> {
        self.record(format!("registered_agent_payment_status({}, {})", start, end))?;
        Ok(Self::breakdown())
    }

    async fn order_service_types(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<LabeledValue>, AppError> {
        self.record(format!("order_service_types({}, {})", start, end))?;
        Ok(Self::breakdown())
    }
}
