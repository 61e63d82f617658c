use crate::core::{AppError, Result};
use crate::modules::identity::{CurrentUser, Role};

/// Uniform message for every hidden or unknown report
pub const REPORT_NOT_FOUND: &str = "report";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny,
}

/// Guard evaluated before any report work starts.
///
/// A denial surfaces as not-found so that unauthorised principals cannot
/// tell the reports exist.
#[derive(Debug, Clone, Copy)]
pub struct AccessGate {
    required_role: Role,
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::admin_only()
    }
}

impl AccessGate {
    pub fn admin_only() -> Self {
        Self {
            required_role: Role::Admin,
        }
    }

    pub fn authorize(&self, user: &CurrentUser) -> AccessDecision {
        if user.has_role(self.required_role) {
            AccessDecision::Allow
        } else {
            AccessDecision::Deny
        }
    }

    pub fn enforce(&self, user: &CurrentUser) -> Result<()> {
        match self.authorize(user) {
            AccessDecision::Allow => Ok(()),
            AccessDecision::Deny => {
                tracing::debug!(user_id = %user.id, "Report access denied");
                Err(AppError::not_found(REPORT_NOT_FOUND))
            }
        }
    }
}
