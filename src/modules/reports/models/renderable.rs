use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::Result;
use crate::modules::reports::models::{DateRange, ReportDataset, ReportKind};

/// What the dispatcher hands to the rendering boundary
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableResult {
    pub kind: ReportKind,
    pub title: &'static str,
    pub template: &'static str,
    /// Window the data covers; `None` for reports that take no range
    pub range: Option<DateRange>,
    pub dataset: ReportDataset,
}

impl RenderableResult {
    pub fn new(kind: ReportKind, range: Option<DateRange>, dataset: ReportDataset) -> Self {
        Self {
            kind,
            title: kind.title(),
            template: kind.template(),
            range,
            dataset,
        }
    }

    /// Flat key/value bundle for the template: `title` plus the dataset fields
    pub fn into_context(self) -> Result<Map<String, Value>> {
        let mut context = Map::new();
        context.insert("title".to_string(), Value::from(self.title));

        if let Some(range) = self.range {
            context.insert("startDate".to_string(), Value::from(range.start_iso()));
            context.insert("finishDate".to_string(), Value::from(range.end_iso()));
        }

        context.extend(self.dataset.into_fields(self.kind.descriptor().data_key)?);
        Ok(context)
    }
}

/// Landing page counts of orders opened since the start of the week, month and year
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOverview {
    pub orders_opened_this_week: u64,
    pub orders_opened_this_month: u64,
    pub orders_opened_this_year: u64,
}

impl ReportOverview {
    pub const TITLE: &'static str = "Reports";
    pub const TEMPLATE: &'static str = "reports.main-report";

    pub fn into_context(self) -> Result<Map<String, Value>> {
        let mut context = Map::new();
        context.insert("title".to_string(), Value::from(Self::TITLE));

        if let Value::Object(fields) = serde_json::to_value(&self)? {
            context.extend(fields);
        }

        Ok(context)
    }
}
