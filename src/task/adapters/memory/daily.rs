//! In-memory daily work-log sink.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{DailyTaskStatus, TaskId},
    ports::{DailyLogError, DailyLogResult, DailyLogSync},
};

/// Thread-safe in-memory daily work-log.
///
/// Records the most recent status pushed for each task so tests can
/// observe completion/revision propagation.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDailyLog {
    state: Arc<RwLock<HashMap<TaskId, DailyTaskStatus>>>,
}

impl InMemoryDailyLog {
    /// Creates an empty in-memory daily log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recent status pushed for the task, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DailyLogError::Persistence`] when the backing lock is
    /// poisoned.
    pub fn status_for(&self, task_id: TaskId) -> DailyLogResult<Option<DailyTaskStatus>> {
        let state = self
            .state
            .read()
            .map_err(|err| DailyLogError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state.get(&task_id).copied())
    }
}

#[async_trait]
impl DailyLogSync for InMemoryDailyLog {
    async fn sync_status(&self, task_id: TaskId, status: DailyTaskStatus) -> DailyLogResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| DailyLogError::persistence(std::io::Error::other(err.to_string())))?;
        state.insert(task_id, status);
        Ok(())
    }
}
