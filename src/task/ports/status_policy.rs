//! Status value-set policy port.

use crate::task::domain::TaskStatus;
use thiserror::Error;

/// Pre-commit hook consulted before any status write.
///
/// Some deployments restrict which status values are active; an
/// implementation may reject an otherwise-legal transition. Rejection
/// leaves the task unmodified.
pub trait StatusPolicy: Send + Sync {
    /// Checks whether the target status may be committed.
    ///
    /// # Errors
    ///
    /// Returns [`StatusRejection`] when the status is not accepted by
    /// the active policy.
    fn check(&self, status: TaskStatus) -> Result<(), StatusRejection>;
}

/// Rejection issued by a [`StatusPolicy`] implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("status '{status}' was rejected by the status policy: {detail}")]
pub struct StatusRejection {
    /// The status that was refused.
    pub status: TaskStatus,
    /// Policy-specific explanation.
    pub detail: String,
}

impl StatusRejection {
    /// Creates a rejection for the given status.
    #[must_use]
    pub fn new(status: TaskStatus, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}
