pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use controllers::ReportsState;
pub use models::{DateRange, RenderableResult, ReportDataset, ReportKind};
pub use repositories::{MySqlReportRepository, ReportRepository};
pub use services::{AccessGate, DateRangePolicy, ReportDispatcher, ReportRegistry};
