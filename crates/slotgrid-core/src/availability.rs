//! Bookable-slot and blocking-interval resolution for a date and staff member.
//!
//! Narrows raw per-staff working slots, leave intervals, and break intervals
//! down to what a booking flow can actually offer: the dates still worth
//! showing, the non-past slots on a date, and the minute-of-day blocks that
//! must be rendered as unavailable.
//!
//! Missing data is a valid state, not an error: a staff member with no slot
//! entries is simply fully booked. Callers distinguish "no slots" from
//! "fetch failed" upstream of this module.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::slots::{filter_future_slots, is_slot_in_past};
use crate::types::{BreakInterval, BusinessHours, LeaveInterval, SlotsByDate};
use crate::wallclock::parse_timezone;

/// Dates still worth offering: strictly after `now`'s date, or `now`'s date
/// itself when it has at least one non-past slot. Sorted ascending.
pub fn available_dates(slots: &SlotsByDate, now: NaiveDateTime) -> Vec<NaiveDate> {
    let today = now.date();
    slots
        .iter()
        .filter(|(date, labels)| {
            **date > today
                || (**date == today && labels.iter().any(|l| !is_slot_in_past(l, **date, now)))
        })
        .map(|(date, _)| *date)
        .collect()
}

/// Non-past slot labels for `date`, in API order. Empty when the date has no
/// entry -- a common, valid state (service fully booked).
pub fn slots_for_date(slots: &SlotsByDate, date: NaiveDate, now: NaiveDateTime) -> Vec<String> {
    slots
        .get(&date)
        .map(|labels| filter_future_slots(labels, date, now))
        .unwrap_or_default()
}

/// Leaves of `staff_id` covering `date`.
///
/// A leave applies iff `wall_date(start) <= date < wall_date(end)` in the
/// business timezone -- the end is exclusive at day granularity, so an
/// all-day leave ending at midnight of day N does not cover day N.
pub fn leaves_on<'a>(
    leaves: &'a [LeaveInterval],
    staff_id: &str,
    date: NaiveDate,
    timezone: &str,
) -> Result<Vec<&'a LeaveInterval>> {
    let tz = parse_timezone(timezone)?;
    Ok(leaves
        .iter()
        .filter(|leave| {
            leave.staff_id == staff_id
                && leave.start.with_timezone(&tz).date_naive() <= date
                && date < leave.end.with_timezone(&tz).date_naive()
        })
        .collect())
}

/// Breaks of `staff_id` falling on `date`: recurring breaks by weekday
/// membership, one-off breaks by exact calendar date.
pub fn breaks_on<'a>(
    breaks: &'a [BreakInterval],
    staff_id: &str,
    date: NaiveDate,
) -> Vec<&'a BreakInterval> {
    breaks
        .iter()
        .filter(|brk| {
            brk.staff_id == staff_id
                && if brk.recurring {
                    brk.recurring_days.contains(&date.weekday())
                } else {
                    brk.specific_date == Some(date)
                }
        })
        .collect()
}

/// What kind of block an unavailable interval came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Leave,
    Break,
}

/// A minute-of-day interval on a given date during which `staff_id` cannot
/// be booked. Produced for rendering; no ordering is guaranteed among
/// same-day blocks -- visual stacking belongs to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockingInterval {
    pub kind: BlockKind,
    pub label: String,
    pub start_minute: u32,
    pub end_minute: u32,
}

/// All blocking intervals for `staff_id` on `date`: applying leaves clipped
/// to the day, plus that day's breaks.
pub fn blocking_intervals(
    leaves: &[LeaveInterval],
    breaks: &[BreakInterval],
    staff_id: &str,
    date: NaiveDate,
    timezone: &str,
) -> Result<Vec<BlockingInterval>> {
    let tz = parse_timezone(timezone)?;
    let mut blocks = Vec::new();

    for leave in leaves_on(leaves, staff_id, date, timezone)? {
        let local_start = leave.start.with_timezone(&tz);
        let start_minute = if local_start.date_naive() == date {
            local_start.hour() * 60 + local_start.minute()
        } else {
            0
        };
        // The end day is excluded by the day-granular rule, so an applying
        // leave always blocks through local midnight.
        blocks.push(BlockingInterval {
            kind: BlockKind::Leave,
            label: leave.label.clone(),
            start_minute,
            end_minute: 1440,
        });
    }

    for brk in breaks_on(breaks, staff_id, date) {
        blocks.push(BlockingInterval {
            kind: BlockKind::Break,
            label: brk.label.clone(),
            start_minute: brk.start_minute,
            end_minute: brk.end_minute,
        });
    }

    Ok(blocks)
}

/// Short-circuit: the business is closed all day on `date`.
pub fn day_closed(hours: &BusinessHours, date: NaiveDate) -> bool {
    !hours.is_open_on(date.weekday())
}
