//! Mutation payload planning.
//!
//! The engine computes what a cancel/reschedule/booking call should send --
//! UTC instants derived from a picked date and slot label -- and enforces
//! the lockout gate. It never performs the HTTP call; that belongs to the
//! caller's network layer.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::policy::can_cancel_or_reschedule;
use crate::slots::parse_slot_label;
use crate::types::Appointment;
use crate::wallclock::wall_time_to_utc;

/// Duration assumed for a new booking when the caller does not supply one.
pub const DEFAULT_APPOINTMENT_MINUTES: i64 = 60;

/// Payload for a reschedule call: new UTC window plus the assigned staff.
/// Instants serialize as ISO-8601 UTC strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReschedulePlan {
    pub appointment_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub staff_id: String,
}

/// Payload for a cancel call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelPlan {
    pub appointment_id: String,
}

/// Payload for booking a new appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingPlan {
    pub calendar_id: String,
    pub staff_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Plan moving `appointment` to `slot_label` on `date`.
///
/// The new window keeps the appointment's existing duration. Gated by
/// [`can_cancel_or_reschedule`]; a locked appointment returns
/// `MutationLocked` rather than a plan.
pub fn plan_reschedule(
    appointment: &Appointment,
    date: NaiveDate,
    slot_label: &str,
    timezone: &str,
    now: DateTime<Utc>,
    window: Duration,
) -> Result<ReschedulePlan> {
    if !can_cancel_or_reschedule(appointment, now, window) {
        return Err(ScheduleError::MutationLocked(appointment.id.clone()));
    }
    let start = slot_start_utc(date, slot_label, timezone)?;
    // The gate guarantees a window is present.
    let duration = appointment
        .window()
        .map(|(s, e)| e - s)
        .unwrap_or_else(|| Duration::minutes(DEFAULT_APPOINTMENT_MINUTES));
    Ok(ReschedulePlan {
        appointment_id: appointment.id.clone(),
        start,
        end: start + duration,
        staff_id: appointment.assigned_user_id.clone(),
    })
}

/// Plan cancelling `appointment`, enforcing the same gate as reschedule.
pub fn plan_cancel(
    appointment: &Appointment,
    now: DateTime<Utc>,
    window: Duration,
) -> Result<CancelPlan> {
    if !can_cancel_or_reschedule(appointment, now, window) {
        return Err(ScheduleError::MutationLocked(appointment.id.clone()));
    }
    Ok(CancelPlan {
        appointment_id: appointment.id.clone(),
    })
}

/// Plan a brand-new booking for `slot_label` on `date`.
pub fn plan_booking(
    calendar_id: &str,
    staff_id: &str,
    date: NaiveDate,
    slot_label: &str,
    duration_minutes: Option<i64>,
    timezone: &str,
) -> Result<BookingPlan> {
    let start = slot_start_utc(date, slot_label, timezone)?;
    let duration = Duration::minutes(duration_minutes.unwrap_or(DEFAULT_APPOINTMENT_MINUTES));
    Ok(BookingPlan {
        calendar_id: calendar_id.to_string(),
        staff_id: staff_id.to_string(),
        start,
        end: start + duration,
    })
}

fn slot_start_utc(date: NaiveDate, slot_label: &str, timezone: &str) -> Result<DateTime<Utc>> {
    let slot = parse_slot_label(slot_label)
        .ok_or_else(|| ScheduleError::InvalidSlotLabel(slot_label.to_string()))?;
    wall_time_to_utc(
        timezone,
        date.year(),
        date.month(),
        date.day(),
        slot.hour,
        slot.minute,
    )
}
