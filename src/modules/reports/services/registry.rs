use std::collections::HashMap;
use std::sync::Arc;

use crate::core::{AppError, Result};
use crate::modules::reports::models::ReportKind;
use crate::modules::reports::repositories::ReportRepository;
use crate::modules::reports::services::access_gate::REPORT_NOT_FOUND;
use crate::modules::reports::services::handlers::{standard_table, ReportHandler};

/// Read-only map from report kind to handler, built once at startup.
///
/// Construction fails unless every `ReportKind` has exactly one handler, so a
/// missing registration is caught before the server accepts requests.
#[derive(Debug)]
pub struct ReportRegistry {
    handlers: HashMap<ReportKind, ReportHandler>,
}

impl ReportRegistry {
    pub fn from_table(table: Vec<(ReportKind, ReportHandler)>) -> Result<Self> {
        let mut handlers = HashMap::with_capacity(table.len());

        for (kind, handler) in table {
            if handlers.insert(kind, handler).is_some() {
                return Err(AppError::configuration(format!(
                    "report {} registered more than once",
                    kind
                )));
            }
        }

        let missing: Vec<&str> = ReportKind::ALL
            .iter()
            .filter(|kind| !handlers.contains_key(*kind))
            .map(|kind| kind.token())
            .collect();

        if !missing.is_empty() {
            return Err(AppError::configuration(format!(
                "reports without a handler: {}",
                missing.join(", ")
            )));
        }

        Ok(Self { handlers })
    }

    /// Registry over the standard catalogue
    pub fn standard(repo: Arc<dyn ReportRepository>, years_back: u32) -> Result<Self> {
        Self::from_table(standard_table(repo, years_back))
    }

    /// Look up an external identifier; anything unregistered is not-found
    pub fn resolve(&self, identifier: &str) -> Result<(ReportKind, &ReportHandler)> {
        ReportKind::parse(identifier)
            .and_then(|kind| self.handlers.get(&kind).map(|handler| (kind, handler)))
            .ok_or_else(|| AppError::not_found(REPORT_NOT_FOUND))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
