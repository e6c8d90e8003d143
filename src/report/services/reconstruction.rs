//! Work-session reconstruction from the lifecycle event stream.
//!
//! A single forward pass over the time-ordered events of one task:
//! start-like events open a session, stop-like events close one.
//! Historical data contains gaps and anomalies, so the pass is lenient
//! by design: duplicate start-like events and stray stop events are
//! ignored, implausibly long spans are capped to the end of the
//! workday, and sessions left open on a past day are closed as if the
//! pause had been forgotten.

use crate::report::domain::{EffortReport, SessionTag, WorkSession};
use crate::task::domain::{EffortSeconds, LifecycleEvent, Task};
use chrono::{DateTime, Duration, FixedOffset, Offset, TimeZone, Timelike, Utc};

/// Tuning knobs for session reconstruction.
///
/// The defaults reproduce the established reporting behaviour; they
/// are business heuristics, not physical constants, and deployments
/// may tune them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconstructionPolicy {
    /// Raw spans longer than this many hours are not trusted as
    /// continuous work.
    pub outlier_threshold_hours: i64,
    /// Hour of the local day (0-23) at which capped sessions end.
    pub workday_cap_hour: u32,
    /// Timezone used for every wall-clock decision in one pass.
    ///
    /// Events and `now` are converted once at ingestion; local and UTC
    /// views are never mixed mid-computation.
    pub timezone: FixedOffset,
}

impl ReconstructionPolicy {
    /// Default outlier threshold in hours.
    pub const DEFAULT_OUTLIER_THRESHOLD_HOURS: i64 = 12;
    /// Default workday cap hour.
    pub const DEFAULT_WORKDAY_CAP_HOUR: u32 = 17;

    /// Creates the default policy in the given timezone.
    #[must_use]
    pub const fn with_timezone(timezone: FixedOffset) -> Self {
        Self {
            outlier_threshold_hours: Self::DEFAULT_OUTLIER_THRESHOLD_HOURS,
            workday_cap_hour: Self::DEFAULT_WORKDAY_CAP_HOUR,
            timezone,
        }
    }

    fn outlier_threshold(&self) -> Duration {
        Duration::hours(self.outlier_threshold_hours)
    }
}

impl Default for ReconstructionPolicy {
    fn default() -> Self {
        Self::with_timezone(Utc.fix())
    }
}

/// Pure engine deriving work sessions from lifecycle events.
///
/// Stateless: for a fixed event list, `now`, and policy the output is
/// identical across runs.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tempo::report::services::SessionReconstructor;
/// use tempo::task::domain::{
///     ActorId, EventId, EventKind, LifecycleEvent, PersistedEventData, TaskId,
/// };
///
/// let task_id = TaskId::new();
/// let actor = ActorId::new();
/// let event = |kind, hour| {
///     LifecycleEvent::from_persisted(PersistedEventData {
///         id: EventId::new(),
///         task_id,
///         kind,
///         recorded_at: Utc.with_ymd_and_hms(2025, 3, 4, hour, 0, 0).unwrap(),
///         actor,
///     })
/// };
///
/// let reconstructor = SessionReconstructor::default();
/// let now = Utc.with_ymd_and_hms(2025, 3, 4, 12, 0, 0).unwrap();
/// let sessions = reconstructor.reconstruct(
///     &[event(EventKind::Started, 9), event(EventKind::Paused, 10)],
///     now,
/// );
/// assert_eq!(sessions.len(), 1);
/// assert_eq!(sessions[0].duration_seconds(), 3600);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionReconstructor {
    policy: ReconstructionPolicy,
}

impl SessionReconstructor {
    /// Creates a reconstructor with the given policy.
    #[must_use]
    pub const fn new(policy: ReconstructionPolicy) -> Self {
        Self { policy }
    }

    /// Returns the active policy.
    #[must_use]
    pub const fn policy(&self) -> &ReconstructionPolicy {
        &self.policy
    }

    /// Derives the work sessions for one task's event stream.
    ///
    /// Events are converted into the policy timezone and stably sorted
    /// by timestamp at ingestion, then folded in a single pass.
    #[must_use]
    pub fn reconstruct(
        &self,
        events: &[LifecycleEvent],
        now: DateTime<Utc>,
    ) -> Vec<WorkSession> {
        let zone = self.policy.timezone;
        let now_local = now.with_timezone(&zone);

        let mut timeline: Vec<(DateTime<FixedOffset>, bool)> = events
            .iter()
            .map(|event| {
                (
                    event.recorded_at().with_timezone(&zone),
                    event.kind().opens_session(),
                )
            })
            .collect();
        timeline.sort_by_key(|(recorded_at, _)| *recorded_at);

        let mut sessions = Vec::new();
        let mut open_start: Option<DateTime<FixedOffset>> = None;
        for (recorded_at, opens) in timeline {
            if opens {
                // A second start-like event without an intervening stop
                // must not move an already-open session start.
                if open_start.is_none() {
                    open_start = Some(recorded_at);
                }
            } else if let Some(start) = open_start.take() {
                sessions.push(self.close_session(start, recorded_at));
            } else {
                // Stray stop with no open session: historical streams
                // contain these gaps, so the event is dropped.
                tracing::debug!(%recorded_at, "ignoring stop event with no open session");
            }
        }

        if let Some(start) = open_start {
            sessions.push(self.close_trailing(start, now_local));
        }
        sessions
    }

    /// Derives sessions and the effort total for one task.
    ///
    /// When the task carries a manual effort override, the override
    /// supplies the total and the computed sessions are retained for
    /// audit display only.
    #[must_use]
    pub fn effort_report(
        &self,
        task: &Task,
        events: &[LifecycleEvent],
        now: DateTime<Utc>,
    ) -> EffortReport {
        let sessions = self.reconstruct(events, now);
        let computed: i64 = sessions
            .iter()
            .map(WorkSession::duration_seconds)
            .sum();
        let override_applied = task.manual_effort_override().is_some();
        let total = task
            .manual_effort_override()
            .map_or(computed, EffortSeconds::value);
        EffortReport::new(sessions, total, override_applied)
    }

    /// Closes a session that has a recorded stop event.
    fn close_session(
        &self,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> WorkSession {
        let raw = end.signed_duration_since(start);
        if raw <= self.policy.outlier_threshold() {
            return WorkSession::new(
                start,
                end,
                raw.num_seconds(),
                SessionTag::Normal,
                None,
            );
        }

        // The recorded span is too long to be continuous work; assume
        // the stop event is untrustworthy and cap at the workday end.
        let capped = self.clamp_capped_end(start, end);
        tracing::debug!(
            %start,
            reported_end = %end,
            capped_end = %capped,
            "capping outlier session"
        );
        WorkSession::new(
            start,
            capped,
            capped.signed_duration_since(start).num_seconds(),
            SessionTag::AutoCappedOutlier,
            Some(end),
        )
    }

    /// Closes the session left open after the final event.
    fn close_trailing(
        &self,
        start: DateTime<FixedOffset>,
        now_local: DateTime<FixedOffset>,
    ) -> WorkSession {
        if start.date_naive() == now_local.date_naive() {
            return WorkSession::new(
                start,
                now_local,
                now_local.signed_duration_since(start).num_seconds(),
                SessionTag::Ongoing,
                None,
            );
        }

        // Left running on a past day: the pause was forgotten, so the
        // original end is unknowable. Cap against now as outer bound.
        let capped = self.clamp_capped_end(start, now_local);
        tracing::debug!(%start, capped_end = %capped, "closing forgotten session");
        WorkSession::new(
            start,
            capped,
            capped.signed_duration_since(start).num_seconds(),
            SessionTag::AutoCapped,
            None,
        )
    }

    /// Applies the workday cap with its fallbacks.
    ///
    /// The capped end is the cap hour on the start's local day, or
    /// start + 1 h when the start is already past the cap hour. A cap
    /// beyond `bound` falls back to `bound`; a cap before the start
    /// falls back to start + 1 h.
    fn clamp_capped_end(
        &self,
        start: DateTime<FixedOffset>,
        bound: DateTime<FixedOffset>,
    ) -> DateTime<FixedOffset> {
        let mut capped = self.capped_end(start);
        if capped > bound {
            capped = bound;
        }
        if capped < start {
            capped = start + Duration::hours(1);
        }
        capped
    }

    /// Returns the cap-hour timestamp for the start's local day.
    fn capped_end(&self, start: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        if start.hour() >= self.policy.workday_cap_hour {
            return start + Duration::hours(1);
        }
        start
            .date_naive()
            .and_hms_opt(self.policy.workday_cap_hour, 0, 0)
            .and_then(|naive| start.timezone().from_local_datetime(&naive).single())
            .unwrap_or_else(|| start + Duration::hours(1))
    }
}
