//! Tests for wall-clock <-> UTC conversion.

use chrono::{Duration, TimeZone, Utc};
use slotgrid_core::error::ScheduleError;
use slotgrid_core::{minute_of_day, utc_offset, wall_date, wall_time_to_utc};

// ── Wall time to UTC ─────────────────────────────────────────────────────────

#[test]
fn denver_winter_wall_time_is_utc_minus_7() {
    // MST: 09:00 local -> 16:00 UTC
    let instant = wall_time_to_utc("America/Denver", 2024, 1, 15, 9, 0).unwrap();
    assert_eq!(instant, Utc.with_ymd_and_hms(2024, 1, 15, 16, 0, 0).unwrap());
}

#[test]
fn denver_summer_wall_time_is_utc_minus_6() {
    // MDT: 09:00 local -> 15:00 UTC, a different offset than winter
    let instant = wall_time_to_utc("America/Denver", 2024, 7, 15, 9, 0).unwrap();
    assert_eq!(instant, Utc.with_ymd_and_hms(2024, 7, 15, 15, 0, 0).unwrap());
}

#[test]
fn utc_wall_time_is_identity() {
    let instant = wall_time_to_utc("UTC", 2024, 3, 1, 12, 30).unwrap();
    assert_eq!(instant, Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap());
}

#[test]
fn tokyo_has_no_dst() {
    let winter = wall_time_to_utc("Asia/Tokyo", 2024, 1, 15, 9, 0).unwrap();
    let summer = wall_time_to_utc("Asia/Tokyo", 2024, 7, 15, 9, 0).unwrap();
    assert_eq!(winter, Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap());
    assert_eq!(summer, Utc.with_ymd_and_hms(2024, 7, 15, 0, 0, 0).unwrap());
}

// ── Offset queries ───────────────────────────────────────────────────────────

#[test]
fn denver_offset_changes_across_dst() {
    let winter = utc_offset(
        "America/Denver",
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
    )
    .unwrap();
    let summer = utc_offset(
        "America/Denver",
        Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap(),
    )
    .unwrap();
    assert_eq!(winter, Duration::hours(-7));
    assert_eq!(summer, Duration::hours(-6));
}

#[test]
fn utc_offset_of_utc_is_zero() {
    let offset = utc_offset("UTC", Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()).unwrap();
    assert_eq!(offset, Duration::zero());
}

// ── Wall projections ─────────────────────────────────────────────────────────

#[test]
fn wall_date_crosses_midnight_westward() {
    // 02:00 UTC on the 16th is still the evening of the 15th in Denver.
    let instant = Utc.with_ymd_and_hms(2024, 1, 16, 2, 0, 0).unwrap();
    let date = wall_date("America/Denver", instant).unwrap();
    assert_eq!(date, "2024-01-15".parse().unwrap());
}

#[test]
fn minute_of_day_projects_to_local_wall_clock() {
    // 16:00 UTC in January Denver is 09:00 local -> minute 540.
    let instant = Utc.with_ymd_and_hms(2024, 1, 15, 16, 0, 0).unwrap();
    assert_eq!(minute_of_day("America/Denver", instant).unwrap(), 540);
}

// ── Failure modes ────────────────────────────────────────────────────────────

#[test]
fn unknown_timezone_is_rejected() {
    let err = wall_time_to_utc("America/Nowhere", 2024, 1, 15, 9, 0).unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidTimezone(_)));
}

#[test]
fn out_of_range_fields_are_rejected_not_normalized() {
    assert!(matches!(
        wall_time_to_utc("UTC", 2024, 13, 1, 9, 0).unwrap_err(),
        ScheduleError::InvalidWallTime(_)
    ));
    assert!(matches!(
        wall_time_to_utc("UTC", 2024, 2, 30, 9, 0).unwrap_err(),
        ScheduleError::InvalidWallTime(_)
    ));
    assert!(matches!(
        wall_time_to_utc("UTC", 2024, 1, 15, 24, 0).unwrap_err(),
        ScheduleError::InvalidWallTime(_)
    ));
    assert!(matches!(
        wall_time_to_utc("UTC", 2024, 1, 15, 9, 60).unwrap_err(),
        ScheduleError::InvalidWallTime(_)
    ));
}

#[test]
fn leap_day_is_valid() {
    let instant = wall_time_to_utc("UTC", 2024, 2, 29, 0, 0).unwrap();
    assert_eq!(instant, Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
}
