//! Mutation gating for appointments.
//!
//! One predicate, [`can_cancel_or_reschedule`], governs whether cancel and
//! reschedule actions are offered. Every surface reuses it; the rule is
//! never re-derived per screen.

use chrono::{DateTime, Duration, Utc};

use crate::types::Appointment;

/// The default lockout window: mutations close 2 hours before start.
pub fn lockout_window() -> Duration {
    Duration::hours(2)
}

/// Whether `start` is within `window` of `now` (or already behind it).
pub fn is_within_lockout(start: DateTime<Utc>, now: DateTime<Utc>, window: Duration) -> bool {
    start <= now + window
}

/// Whether the appointment is over.
pub fn has_ended(end: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now > end
}

/// True iff the appointment is not cancelled, not inside the lockout
/// window, and not already ended.
///
/// An appointment missing either instant is not actionable.
pub fn can_cancel_or_reschedule(
    appointment: &Appointment,
    now: DateTime<Utc>,
    window: Duration,
) -> bool {
    if appointment.is_cancelled() {
        return false;
    }
    let Some((start, end)) = appointment.window() else {
        return false;
    };
    !is_within_lockout(start, now, window) && !has_ended(end, now)
}
