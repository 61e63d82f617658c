use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::{AppError, Result};
use crate::modules::identity::CurrentUser;
use crate::modules::reports::models::{RenderableResult, ReportKind};
use crate::modules::reports::services::access_gate::AccessGate;
use crate::modules::reports::services::date_range_policy::DateRangePolicy;
use crate::modules::reports::services::handlers::ReportHandler;
use crate::modules::reports::services::registry::ReportRegistry;

/// Runs one report request: gate, resolve, pick the range, invoke, wrap.
///
/// Holds no per-request state; one instance serves all requests concurrently.
pub struct ReportDispatcher {
    registry: Arc<ReportRegistry>,
    gate: AccessGate,
    policy: DateRangePolicy,
}

impl ReportDispatcher {
    pub fn new(registry: Arc<ReportRegistry>, gate: AccessGate, policy: DateRangePolicy) -> Self {
        Self {
            registry,
            gate,
            policy,
        }
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// Produce the renderable result for `identifier` as of `today`.
    ///
    /// # Errors
    /// `NotFound` when the principal is not authorised or the identifier is
    /// unknown (indistinguishable on purpose). Handler failures come back as
    /// server-side errors and are not retried.
    pub async fn dispatch(
        &self,
        identifier: &str,
        user: &CurrentUser,
        today: NaiveDate,
    ) -> Result<RenderableResult> {
        self.gate.enforce(user)?;
        let (kind, handler) = self.registry.resolve(identifier)?;

        let (range, outcome) = match handler {
            ReportHandler::Unranged(report) => (None, report.get_data(today).await),
            ReportHandler::Ranged(report) => {
                let range = self.policy.resolve_default_range(today);
                let outcome = report.get_data(&range).await;
                (Some(range), outcome)
            }
        };

        let dataset = outcome.map_err(|err| handler_failure(kind, err))?;

        info!(
            report = %kind,
            user_id = %user.id,
            range = ?range.map(|r| r.to_string()),
            "Report generated"
        );

        Ok(RenderableResult::new(kind, range, dataset))
    }
}

/// Keep handler failures out of the not-found class; everything else passes through
fn handler_failure(kind: ReportKind, err: AppError) -> AppError {
    warn!(report = %kind, error = %err, "Report handler failed");

    match err {
        AppError::NotFound(msg) | AppError::Validation(msg) => {
            AppError::internal(format!("{} report failed: {}", kind, msg))
        }
        other => other,
    }
}
