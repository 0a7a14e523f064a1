// ── Live-class time-status classification ──
//
// Maps a scheduled start time against "now" onto the four countdown
// badge states. Display only: access to the owning course is decided by
// `crate::access`, never here.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How close a start time has to be to count as "starting soon".
const SOON_WINDOW: Duration = Duration::seconds(3600);

/// Countdown badge state for a scheduled live class.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionPhase {
    /// Start time is in the past.
    Ended,
    /// Within an hour of starting.
    StartingSoon,
    /// Later on the same calendar day.
    Today,
    /// A future day.
    Later,
}

/// Classify `start` relative to `now`.
///
/// "Same day" is the UTC calendar day of the injected clock; callers
/// that want the viewer's local day convert before calling.
pub fn classify(start: DateTime<Utc>, now: DateTime<Utc>) -> SessionPhase {
    if start <= now {
        return SessionPhase::Ended;
    }
    if start - now <= SOON_WINDOW {
        return SessionPhase::StartingSoon;
    }
    if start.date_naive() == now.date_naive() {
        return SessionPhase::Today;
    }
    SessionPhase::Later
}

/// Time left until `start`, or `None` once it has passed.
pub fn time_until(start: DateTime<Utc>, now: DateTime<Utc>) -> Option<Duration> {
    (start > now).then(|| start - now)
}
