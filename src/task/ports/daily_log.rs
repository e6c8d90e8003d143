//! Daily work-log synchronisation port.

use crate::task::domain::{DailyTaskStatus, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for daily log operations.
pub type DailyLogResult<T> = Result<T, DailyLogError>;

/// Push-side contract for the per-day work-log entity.
///
/// The work log itself is owned by the surrounding application;
/// completing a task marks its current log line completed and revising
/// it marks the line pending again.
#[async_trait]
pub trait DailyLogSync: Send + Sync {
    /// Updates the work-log status for the task's current log line.
    ///
    /// Implementations treat a task without a log line as a no-op: the
    /// log is populated by planning flows this core does not own.
    ///
    /// # Errors
    ///
    /// Returns [`DailyLogError::Persistence`] when the update cannot be
    /// written.
    async fn sync_status(&self, task_id: TaskId, status: DailyTaskStatus) -> DailyLogResult<()>;
}

/// Errors returned by daily log implementations.
#[derive(Debug, Clone, Error)]
pub enum DailyLogError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DailyLogError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
