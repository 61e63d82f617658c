pub mod access_gate;
pub mod date_range_policy;
pub mod dispatcher;
pub mod handlers;
pub mod overview;
pub mod registry;
pub mod render;
pub mod year_over_year;

pub use access_gate::{AccessDecision, AccessGate, REPORT_NOT_FOUND};
pub use date_range_policy::{resolve_default_range, DateRangePolicy, DEFAULT_CLOSING_DAY};
pub use dispatcher::ReportDispatcher;
pub use handlers::{RangedReport, ReportHandler, UnrangedReport};
pub use overview::OverviewService;
pub use registry::ReportRegistry;
pub use render::{JsonRenderer, Renderer};
pub use year_over_year::append_total;
