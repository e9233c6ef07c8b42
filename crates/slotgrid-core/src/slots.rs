//! Slot-label parsing and past-slot filtering.
//!
//! The external slot-query API hands back human-readable 12-hour labels
//! (`"9:00 AM"`, `"12:30 PM"`). This module parses them and decides which
//! slots are already in the past relative to a caller-supplied "now".
//!
//! The caller chooses the clock domain of `now`: the comparison happens in
//! whatever domain the `NaiveDateTime` was built in, be that the runtime's
//! local clock or a wall clock derived from the business timezone via
//! [`crate::wallclock`].

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime, Timelike};

/// A parsed slot time in 24-hour form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTime {
    /// 0-23.
    pub hour: u32,
    /// 0-59.
    pub minute: u32,
}

impl SlotTime {
    /// Minutes since midnight.
    pub fn minute_of_day(&self) -> u32 {
        self.hour * 60 + self.minute
    }
}

/// Parse a `H:MM AM|PM` slot label, case-insensitive.
///
/// Leading zeros are tolerated: `"9:00 AM"` and `"09:00 am"` parse
/// identically. 12 AM maps to hour 0, 12 PM to hour 12. Anything not
/// matching the grammar returns `None` -- callers treat unparseable labels
/// as "not past", since hiding a bookable slot is worse than showing an odd
/// one.
pub fn parse_slot_label(label: &str) -> Option<SlotTime> {
    let mut parts = label.trim().split_whitespace();
    let time_part = parts.next()?;
    let meridiem = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let (hour_str, minute_str) = time_part.split_once(':')?;
    if hour_str.is_empty()
        || minute_str.len() != 2
        || !hour_str.chars().all(|c| c.is_ascii_digit())
        || !minute_str.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }
    let hour12: u32 = hour_str.parse().ok()?;
    let minute: u32 = minute_str.parse().ok()?;
    if !(1..=12).contains(&hour12) || minute > 59 {
        return None;
    }

    let hour = if meridiem.eq_ignore_ascii_case("am") {
        if hour12 == 12 {
            0
        } else {
            hour12
        }
    } else if meridiem.eq_ignore_ascii_case("pm") {
        if hour12 == 12 {
            12
        } else {
            hour12 + 12
        }
    } else {
        return None;
    };

    Some(SlotTime { hour, minute })
}

/// Whether the slot `label` on `date` has already passed at `now`.
///
/// A slot starting exactly at `now` counts as past -- it is no longer
/// bookable. Unparseable labels are never past.
pub fn is_slot_in_past(label: &str, date: NaiveDate, now: NaiveDateTime) -> bool {
    let Some(slot) = parse_slot_label(label) else {
        return false;
    };
    match date.cmp(&now.date()) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => {
            let now_minute = now.hour() * 60 + now.minute();
            slot.minute_of_day() <= now_minute
        }
    }
}

/// The order-preserving subsequence of `labels` that are not past at `now`.
pub fn filter_future_slots(labels: &[String], date: NaiveDate, now: NaiveDateTime) -> Vec<String> {
    labels
        .iter()
        .filter(|label| !is_slot_in_past(label, date, now))
        .cloned()
        .collect()
}
