pub mod dataset;
pub mod date_range;
pub mod renderable;
pub mod report_kind;

pub use dataset::{Category, LabeledValue, ReportDataset, Series, SeriesBundle};
pub use date_range::DateRange;
pub use renderable::{RenderableResult, ReportOverview};
pub use report_kind::{ReportDescriptor, ReportKind};
