//! Status value-set policy implementations.
//!
//! Deployments can restrict which status values are active; these are
//! the stock [`StatusPolicy`] implementations wired in by embedders.

use crate::task::domain::TaskStatus;
use crate::task::ports::{StatusPolicy, StatusRejection};

/// Policy accepting every status value.
///
/// The default for deployments without a restricted value set.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAllStatuses;

impl AllowAllStatuses {
    /// Creates the permissive policy.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl StatusPolicy for AllowAllStatuses {
    fn check(&self, _status: TaskStatus) -> Result<(), StatusRejection> {
        Ok(())
    }
}

/// Policy restricting transitions to an enabled subset of statuses.
#[derive(Debug, Clone)]
pub struct EnabledStatusSet {
    enabled: Vec<TaskStatus>,
}

impl EnabledStatusSet {
    /// Creates a policy accepting only the given statuses.
    #[must_use]
    pub fn from_statuses(statuses: impl IntoIterator<Item = TaskStatus>) -> Self {
        Self {
            enabled: statuses.into_iter().collect(),
        }
    }

    /// Returns the enabled statuses.
    #[must_use]
    pub fn enabled(&self) -> &[TaskStatus] {
        &self.enabled
    }
}

impl StatusPolicy for EnabledStatusSet {
    fn check(&self, status: TaskStatus) -> Result<(), StatusRejection> {
        if self.enabled.contains(&status) {
            return Ok(());
        }
        Err(StatusRejection::new(
            status,
            "status is not in the enabled value set for this workspace",
        ))
    }
}
