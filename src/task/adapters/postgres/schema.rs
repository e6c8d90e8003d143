//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Task records with lifecycle status and block metadata.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Status held before the current block.
        #[max_length = 50]
        previous_status -> Nullable<Varchar>,
        /// Reason recorded when the task was blocked.
        block_reason -> Nullable<Text>,
        /// Agreed due date.
        due_date -> Nullable<Date>,
        /// Timestamp of the most recent completion.
        actual_completion_date -> Nullable<Timestamptz>,
        /// Manual effort override in whole seconds.
        manual_effort_override_seconds -> Nullable<Int8>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only lifecycle event log.
    lifecycle_events (id) {
        /// Event identifier.
        id -> Uuid,
        /// Task the event belongs to.
        task_id -> Uuid,
        /// Event kind.
        #[max_length = 50]
        kind -> Varchar,
        /// Timestamp at which the transition was recorded.
        recorded_at -> Timestamptz,
        /// Account that performed the transition.
        actor_id -> Uuid,
    }
}

diesel::allow_tables_to_appear_in_same_query!(tasks, lifecycle_events);
