use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

use crate::core::Result;
use crate::modules::reports::models::{DateRange, ReportDataset, ReportKind};
use crate::modules::reports::repositories::ReportRepository;
use crate::modules::reports::services::year_over_year::{append_total, comparison_years};

/// A report that needs no date range. It still sees the reporting date.
#[async_trait]
pub trait UnrangedReport: Send + Sync {
    async fn get_data(&self, today: NaiveDate) -> Result<ReportDataset>;
}

/// A report aggregated over a date range
#[async_trait]
pub trait RangedReport: Send + Sync {
    async fn get_data(&self, range: &DateRange) -> Result<ReportDataset>;
}

/// Registered handler; the variant is the input the handler declares
#[derive(Clone)]
pub enum ReportHandler {
    Unranged(Arc<dyn UnrangedReport>),
    Ranged(Arc<dyn RangedReport>),
}

impl ReportHandler {
    pub fn unranged(handler: impl UnrangedReport + 'static) -> Self {
        ReportHandler::Unranged(Arc::new(handler))
    }

    pub fn ranged(handler: impl RangedReport + 'static) -> Self {
        ReportHandler::Ranged(Arc::new(handler))
    }

    pub fn requires_range(&self) -> bool {
        matches!(self, ReportHandler::Ranged(_))
    }
}

impl std::fmt::Debug for ReportHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportHandler::Unranged(_) => f.write_str("ReportHandler::Unranged"),
            ReportHandler::Ranged(_) => f.write_str("ReportHandler::Ranged"),
        }
    }
}

/// Reports whose page fetches its own data; only the title is handed over
pub struct TitleOnlyReport;

#[async_trait]
impl UnrangedReport for TitleOnlyReport {
    async fn get_data(&self, _today: NaiveDate) -> Result<ReportDataset> {
        Ok(ReportDataset::Empty)
    }
}

/// Monthly totals for the last few years plus an annual total column
pub struct YearOverYearReport {
    repo: Arc<dyn ReportRepository>,
    years_back: u32,
}

impl YearOverYearReport {
    pub fn new(repo: Arc<dyn ReportRepository>, years_back: u32) -> Self {
        Self { repo, years_back }
    }
}

#[async_trait]
impl UnrangedReport for YearOverYearReport {
    async fn get_data(&self, today: NaiveDate) -> Result<ReportDataset> {
        let years = comparison_years(today.year(), self.years_back);
        let raw = self.repo.monthly_year_over_year(&years, 1, 12).await?;
        let data = append_total(raw)?;

        Ok(ReportDataset::YearOverYear { years, data })
    }
}

/// Range-based breakdowns served straight from the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakdownQuery {
    SalesRepOrders,
    OrdersPaymentStatus,
    RegisteredAgentByState,
    RegisteredAgentPaymentStatus,
    OrderServiceTypes,
}

pub struct BreakdownReport {
    repo: Arc<dyn ReportRepository>,
    query: BreakdownQuery,
}

impl BreakdownReport {
    pub fn new(repo: Arc<dyn ReportRepository>, query: BreakdownQuery) -> Self {
        Self { repo, query }
    }
}

#[async_trait]
impl RangedReport for BreakdownReport {
    async fn get_data(&self, range: &DateRange) -> Result<ReportDataset> {
        let (start, end) = (range.start_iso(), range.end_iso());
        let repo = &self.repo;

        let dataset = match self.query {
            BreakdownQuery::SalesRepOrders => {
                ReportDataset::Series(repo.sales_rep_orders(&start, &end).await?)
            }
            BreakdownQuery::OrdersPaymentStatus => {
                ReportDataset::Series(repo.orders_payment_status(&start, &end).await?)
            }
            BreakdownQuery::RegisteredAgentByState => {
                ReportDataset::Values(repo.registered_agent_by_state(&start, &end).await?)
            }
            BreakdownQuery::RegisteredAgentPaymentStatus => {
                ReportDataset::Values(repo.registered_agent_payment_status(&start, &end).await?)
            }
            BreakdownQuery::OrderServiceTypes => {
                ReportDataset::Values(repo.order_service_types(&start, &end).await?)
            }
        };

        Ok(dataset)
    }
}

/// The report catalogue: one row per report kind.
/// Adding a report means adding its `ReportKind` variant and a row here.
pub fn standard_table(
    repo: Arc<dyn ReportRepository>,
    years_back: u32,
) -> Vec<(ReportKind, ReportHandler)> {
    let breakdown =
        |query| ReportHandler::ranged(BreakdownReport::new(repo.clone(), query));

    vec![
        (ReportKind::WeeklyNewOrders, ReportHandler::unranged(TitleOnlyReport)),
        (
            ReportKind::YearOverYear,
            ReportHandler::unranged(YearOverYearReport::new(repo.clone(), years_back)),
        ),
        (ReportKind::SalesRepOrders, breakdown(BreakdownQuery::SalesRepOrders)),
        (ReportKind::OrdersPaymentStatus, breakdown(BreakdownQuery::OrdersPaymentStatus)),
        (ReportKind::RegisteredAgentByState, breakdown(BreakdownQuery::RegisteredAgentByState)),
        (ReportKind::OrderStatuses, ReportHandler::unranged(TitleOnlyReport)),
        (
            ReportKind::RegisteredAgentPaymentStatus,
            breakdown(BreakdownQuery::RegisteredAgentPaymentStatus),
        ),
        (ReportKind::OrderServiceTypes, breakdown(BreakdownQuery::OrderServiceTypes)),
    ]
}
