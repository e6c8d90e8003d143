//! Append-only lifecycle event records.

use super::{ActorId, EventId, ParseEventKindError, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a lifecycle event.
///
/// Only the four kinds that feed session reconstruction exist; other
/// transitions mutate task state without leaving an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Work began from To Do.
    Started,
    /// Work was paused.
    Paused,
    /// Work resumed after a pause or block.
    Resumed,
    /// Work finished.
    Completed,
}

impl EventKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Paused => "paused",
            Self::Resumed => "resumed",
            Self::Completed => "completed",
        }
    }

    /// Returns true when this kind opens a work session.
    #[must_use]
    pub const fn opens_session(self) -> bool {
        matches!(self, Self::Started | Self::Resumed)
    }

    /// Returns true when this kind closes a work session.
    #[must_use]
    pub const fn closes_session(self) -> bool {
        matches!(self, Self::Paused | Self::Completed)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EventKind {
    type Error = ParseEventKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "started" => Ok(Self::Started),
            "paused" => Ok(Self::Paused),
            "resumed" => Ok(Self::Resumed),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseEventKindError(value.to_owned())),
        }
    }
}

/// One immutable lifecycle transition record.
///
/// Events for a task are totally ordered by [`recorded_at`] and are
/// never mutated or deleted once written. Session reconstruction
/// replays this stream.
///
/// [`recorded_at`]: LifecycleEvent::recorded_at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    id: EventId,
    task_id: TaskId,
    kind: EventKind,
    recorded_at: DateTime<Utc>,
    actor: ActorId,
}

/// Parameter object for reconstructing a persisted lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistedEventData {
    /// Persisted event identifier.
    pub id: EventId,
    /// Task the event belongs to.
    pub task_id: TaskId,
    /// Persisted event kind.
    pub kind: EventKind,
    /// Persisted event timestamp.
    pub recorded_at: DateTime<Utc>,
    /// Account that performed the transition.
    pub actor: ActorId,
}

impl LifecycleEvent {
    /// Creates a new event stamped with the current clock time.
    #[must_use]
    pub fn record(task_id: TaskId, kind: EventKind, actor: ActorId, clock: &impl Clock) -> Self {
        Self {
            id: EventId::new(),
            task_id,
            kind,
            recorded_at: clock.utc(),
            actor,
        }
    }

    /// Reconstructs an event from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedEventData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            kind: data.kind,
            recorded_at: data.recorded_at,
            actor: data.actor,
        }
    }

    /// Returns the event identifier.
    #[must_use]
    pub const fn id(&self) -> EventId {
        self.id
    }

    /// Returns the task this event belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the event kind.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// Returns the timestamp at which the transition was recorded.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    /// Returns the account that performed the transition.
    #[must_use]
    pub const fn actor(&self) -> ActorId {
        self.actor
    }
}
