//! Diesel row models for task and event persistence.

use super::schema::{lifecycle_events, tasks};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Lifecycle status.
    pub status: String,
    /// Status held before the current block.
    pub previous_status: Option<String>,
    /// Reason recorded when the task was blocked.
    pub block_reason: Option<String>,
    /// Agreed due date.
    pub due_date: Option<NaiveDate>,
    /// Timestamp of the most recent completion.
    pub actual_completion_date: Option<DateTime<Utc>>,
    /// Manual effort override in whole seconds.
    pub manual_effort_override_seconds: Option<i64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Lifecycle status.
    pub status: String,
    /// Status held before the current block.
    pub previous_status: Option<String>,
    /// Reason recorded when the task was blocked.
    pub block_reason: Option<String>,
    /// Agreed due date.
    pub due_date: Option<NaiveDate>,
    /// Timestamp of the most recent completion.
    pub actual_completion_date: Option<DateTime<Utc>>,
    /// Manual effort override in whole seconds.
    pub manual_effort_override_seconds: Option<i64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset model for task updates.
///
/// `treat_none_as_null` because unblock and archive must write SQL
/// NULLs over previously set block metadata.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Lifecycle status.
    pub status: String,
    /// Status held before the current block.
    pub previous_status: Option<String>,
    /// Reason recorded when the task was blocked.
    pub block_reason: Option<String>,
    /// Agreed due date.
    pub due_date: Option<NaiveDate>,
    /// Timestamp of the most recent completion.
    pub actual_completion_date: Option<DateTime<Utc>>,
    /// Manual effort override in whole seconds.
    pub manual_effort_override_seconds: Option<i64>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for lifecycle events.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = lifecycle_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EventRow {
    /// Event identifier.
    pub id: uuid::Uuid,
    /// Task the event belongs to.
    pub task_id: uuid::Uuid,
    /// Event kind.
    pub kind: String,
    /// Timestamp at which the transition was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Account that performed the transition.
    pub actor_id: uuid::Uuid,
}

/// Insert model for lifecycle events.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = lifecycle_events)]
pub struct NewEventRow {
    /// Event identifier.
    pub id: uuid::Uuid,
    /// Task the event belongs to.
    pub task_id: uuid::Uuid,
    /// Event kind.
    pub kind: String,
    /// Timestamp at which the transition was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Account that performed the transition.
    pub actor_id: uuid::Uuid,
}
