//! Entities consumed by the engine.
//!
//! All data arrives already deserialized from the external booking and data
//! APIs; these types are the engine's view of it. Validating constructors
//! reject inverted intervals and out-of-range minute bounds at construction
//! time -- those indicate an upstream data bug, not a runtime condition to
//! mask.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Per calendar date, the ordered slot-label sequence (`"9:00 AM"`, ...)
/// returned by the external slot-query API for a service+staff combination.
///
/// `BTreeMap` keeps dates sorted, which is the ordering the upstream system
/// relied on from lexicographic `YYYY-MM-DD` keys.
pub type SlotsByDate = BTreeMap<NaiveDate, Vec<String>>;

/// Derived payment state of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

/// An appointment as read from the booking backend.
///
/// The backend is authoritative: `appointment_status` is an opaque string,
/// not a closed enum. `"cancelled"` is the only value this engine interprets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    /// Opaque identifier assigned by the booking backend.
    pub id: String,
    /// Service identifier this appointment was booked under.
    pub calendar_id: String,
    #[serde(default)]
    pub contact_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub service_name: String,
    /// Free-text status from the backend.
    #[serde(default)]
    pub status: String,
    /// Backend-defined lifecycle status (opaque).
    #[serde(default)]
    pub appointment_status: String,
    /// Staff identifier; empty means unassigned.
    #[serde(default)]
    pub assigned_user_id: String,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub payment_status: PaymentStatus,
}

impl Appointment {
    /// The appointment's timed window, if it has one.
    ///
    /// An appointment missing either instant is invisible to grid rendering
    /// and is filtered upstream of layout.
    pub fn window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Whether the backend marked this appointment cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.appointment_status.eq_ignore_ascii_case("cancelled")
    }

    /// Check the interval invariant: when both instants are present,
    /// `end_time` must be strictly after `start_time`.
    pub fn validate(&self) -> Result<()> {
        if let Some((start, end)) = self.window() {
            if end <= start {
                return Err(ScheduleError::InvalidInterval(format!(
                    "appointment {}: end {} <= start {}",
                    self.id, end, start
                )));
            }
        }
        Ok(())
    }
}

/// A staff time-off interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveInterval {
    pub staff_id: String,
    pub label: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl LeaveInterval {
    /// Build a leave interval, rejecting `start >= end`.
    pub fn new(
        staff_id: impl Into<String>,
        label: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self> {
        if start >= end {
            return Err(ScheduleError::InvalidInterval(format!(
                "leave end {} <= start {}",
                end, start
            )));
        }
        Ok(Self {
            staff_id: staff_id.into(),
            label: label.into(),
            start,
            end,
        })
    }
}

/// A recurring or one-off staff break, expressed as a minute-of-day interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakInterval {
    pub staff_id: String,
    pub label: String,
    pub recurring: bool,
    /// Weekdays the break recurs on; meaningful only when `recurring`.
    #[serde(default)]
    pub recurring_days: Vec<Weekday>,
    /// Minutes since local midnight, `0 <= start < end <= 1440`.
    pub start_minute: u32,
    pub end_minute: u32,
    /// The single date of a one-off break; meaningful only when not
    /// `recurring`.
    #[serde(default)]
    pub specific_date: Option<NaiveDate>,
}

impl BreakInterval {
    /// Build a recurring break on the given weekdays.
    pub fn recurring(
        staff_id: impl Into<String>,
        label: impl Into<String>,
        recurring_days: Vec<Weekday>,
        start_minute: u32,
        end_minute: u32,
    ) -> Result<Self> {
        check_minute_bounds(start_minute, end_minute)?;
        Ok(Self {
            staff_id: staff_id.into(),
            label: label.into(),
            recurring: true,
            recurring_days,
            start_minute,
            end_minute,
            specific_date: None,
        })
    }

    /// Build a one-off break on a specific date.
    pub fn one_off(
        staff_id: impl Into<String>,
        label: impl Into<String>,
        date: NaiveDate,
        start_minute: u32,
        end_minute: u32,
    ) -> Result<Self> {
        check_minute_bounds(start_minute, end_minute)?;
        Ok(Self {
            staff_id: staff_id.into(),
            label: label.into(),
            recurring: false,
            recurring_days: Vec::new(),
            start_minute,
            end_minute,
            specific_date: Some(date),
        })
    }
}

fn check_minute_bounds(start_minute: u32, end_minute: u32) -> Result<()> {
    if start_minute >= end_minute || end_minute > 1440 {
        return Err(ScheduleError::InvalidInterval(format!(
            "break minutes [{}, {}) out of range",
            start_minute, end_minute
        )));
    }
    Ok(())
}

/// Parse the upstream wire form of recurring weekdays: a delimited string of
/// digit characters with 0 = Sunday (e.g., `"0,2,4"` -> Sun, Tue, Thu).
///
/// Non-digit characters act as separators; digits outside 0-6 are rejected.
pub fn parse_recurring_days(raw: &str) -> Result<Vec<Weekday>> {
    let mut days = Vec::new();
    for ch in raw.chars().filter(|c| c.is_ascii_digit()) {
        let day = match ch {
            '0' => Weekday::Sun,
            '1' => Weekday::Mon,
            '2' => Weekday::Tue,
            '3' => Weekday::Wed,
            '4' => Weekday::Thu,
            '5' => Weekday::Fri,
            '6' => Weekday::Sat,
            _ => {
                return Err(ScheduleError::InvalidInterval(format!(
                    "weekday index {} out of range in {:?}",
                    ch, raw
                )))
            }
        };
        if !days.contains(&day) {
            days.push(day);
        }
    }
    Ok(days)
}

/// Open/close state for a single weekday.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayHours {
    pub open: bool,
    pub open_minute: Option<u32>,
    pub close_minute: Option<u32>,
}

impl DayHours {
    pub fn closed() -> Self {
        Self {
            open: false,
            open_minute: None,
            close_minute: None,
        }
    }

    pub fn open(open_minute: u32, close_minute: u32) -> Self {
        Self {
            open: true,
            open_minute: Some(open_minute),
            close_minute: Some(close_minute),
        }
    }
}

/// Weekly opening hours, Sunday-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub days: [DayHours; 7],
}

impl BusinessHours {
    /// Open/close minutes for a weekday, `None` when the day is closed or
    /// has no configured hours.
    pub fn hours_on(&self, weekday: Weekday) -> Option<(u32, u32)> {
        let day = &self.days[weekday.num_days_from_sunday() as usize];
        if !day.open {
            return None;
        }
        match (day.open_minute, day.close_minute) {
            (Some(open), Some(close)) => Some((open, close)),
            _ => None,
        }
    }

    pub fn is_open_on(&self, weekday: Weekday) -> bool {
        self.hours_on(weekday).is_some()
    }
}
