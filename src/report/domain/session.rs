//! Derived work-session values.
//!
//! Sessions are computed fresh from the lifecycle event stream on each
//! reporting request; nothing here is persisted.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Classification of a reconstructed work session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionTag {
    /// A trusted start/stop pair.
    Normal,
    /// The recorded span was implausibly long; the end was capped.
    AutoCappedOutlier,
    /// The session was left open on a past day; the end was capped.
    AutoCapped,
    /// The session is still open on the current day.
    Ongoing,
}

/// One continuous interval of active work on a task.
///
/// Timestamps are expressed in the reconstruction timezone. For capped
/// outliers [`reported_end`] retains the original, untrusted close
/// timestamp; `None` means the close event was missing or the span was
/// trusted as-is.
///
/// [`reported_end`]: WorkSession::reported_end
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkSession {
    started_at: DateTime<FixedOffset>,
    ended_at: DateTime<FixedOffset>,
    duration_seconds: i64,
    tag: SessionTag,
    reported_end: Option<DateTime<FixedOffset>>,
}

impl WorkSession {
    pub(crate) const fn new(
        started_at: DateTime<FixedOffset>,
        ended_at: DateTime<FixedOffset>,
        duration_seconds: i64,
        tag: SessionTag,
        reported_end: Option<DateTime<FixedOffset>>,
    ) -> Self {
        Self {
            started_at,
            ended_at,
            duration_seconds,
            tag,
            reported_end,
        }
    }

    /// Returns the session start.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<FixedOffset> {
        self.started_at
    }

    /// Returns the session end.
    ///
    /// For [`SessionTag::Ongoing`] sessions this is the `now` supplied
    /// to the reconstruction pass.
    #[must_use]
    pub const fn ended_at(&self) -> DateTime<FixedOffset> {
        self.ended_at
    }

    /// Returns the session duration in whole seconds.
    #[must_use]
    pub const fn duration_seconds(&self) -> i64 {
        self.duration_seconds
    }

    /// Returns the session classification.
    #[must_use]
    pub const fn tag(&self) -> SessionTag {
        self.tag
    }

    /// Returns the original close timestamp when the end was capped.
    #[must_use]
    pub const fn reported_end(&self) -> Option<DateTime<FixedOffset>> {
        self.reported_end
    }
}

/// Elapsed-effort summary for one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffortReport {
    sessions: Vec<WorkSession>,
    total_seconds: i64,
    override_applied: bool,
}

impl EffortReport {
    pub(crate) const fn new(
        sessions: Vec<WorkSession>,
        total_seconds: i64,
        override_applied: bool,
    ) -> Self {
        Self {
            sessions,
            total_seconds,
            override_applied,
        }
    }

    /// Returns the reconstructed sessions.
    ///
    /// Always the raw computation, even when a manual override supplies
    /// the total; the sessions remain available for audit display.
    #[must_use]
    pub fn sessions(&self) -> &[WorkSession] {
        &self.sessions
    }

    /// Returns the total elapsed effort in whole seconds.
    #[must_use]
    pub const fn total_seconds(&self) -> i64 {
        self.total_seconds
    }

    /// Returns true when a manual effort override supplied the total.
    #[must_use]
    pub const fn override_applied(&self) -> bool {
        self.override_applied
    }
}
