//! Tests for per-date, per-staff availability resolution.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc, Weekday};
use slotgrid_core::{
    available_dates, blocking_intervals, breaks_on, day_closed, leaves_on, slots_for_date,
    wall_time_to_utc, BlockKind, BreakInterval, BusinessHours, DayHours, LeaveInterval,
    SlotsByDate,
};

const TZ: &str = "America/Denver";

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn at(s: &str) -> NaiveDateTime {
    s.parse().unwrap()
}

/// A UTC instant for local midnight (or any wall time) in the business zone.
fn denver(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    wall_time_to_utc(TZ, y, m, d, h, min).unwrap()
}

fn slot_map(entries: &[(&str, &[&str])]) -> SlotsByDate {
    entries
        .iter()
        .map(|(d, labels)| (date(d), labels.iter().map(|s| s.to_string()).collect()))
        .collect()
}

// ── Available dates ──────────────────────────────────────────────────────────

#[test]
fn past_dates_are_dropped_and_future_kept() {
    let slots = slot_map(&[
        ("2024-01-14", &["9:00 AM"]),
        ("2024-01-16", &["9:00 AM", "9:30 AM"]),
    ]);
    // Today (the 15th) is absent from the map entirely, so it cannot appear.
    let dates = available_dates(&slots, at("2024-01-15T12:00:00"));
    assert_eq!(dates, vec![date("2024-01-16")]);
}

#[test]
fn today_qualifies_only_with_a_non_past_slot() {
    let slots = slot_map(&[("2024-01-15", &["9:00 AM", "5:00 PM"])]);

    let morning = available_dates(&slots, at("2024-01-15T08:00:00"));
    assert_eq!(morning, vec![date("2024-01-15")]);

    // By evening every slot has passed and today drops out.
    let evening = available_dates(&slots, at("2024-01-15T21:00:00"));
    assert!(evening.is_empty());
}

#[test]
fn dates_come_back_sorted() {
    let slots = slot_map(&[
        ("2024-02-01", &["9:00 AM"]),
        ("2024-01-20", &["9:00 AM"]),
        ("2024-01-25", &["9:00 AM"]),
    ]);
    let dates = available_dates(&slots, at("2024-01-15T12:00:00"));
    assert_eq!(
        dates,
        vec![date("2024-01-20"), date("2024-01-25"), date("2024-02-01")]
    );
}

// ── Slots for a date ─────────────────────────────────────────────────────────

#[test]
fn missing_date_yields_empty_not_error() {
    let slots = slot_map(&[("2024-01-16", &["9:00 AM"])]);
    let labels = slots_for_date(&slots, date("2024-01-17"), at("2024-01-15T12:00:00"));
    assert!(labels.is_empty());
}

#[test]
fn todays_slots_are_past_filtered() {
    let slots = slot_map(&[("2024-01-15", &["9:00 AM", "11:30 AM", "2:00 PM"])]);
    let labels = slots_for_date(&slots, date("2024-01-15"), at("2024-01-15T12:00:00"));
    assert_eq!(labels, vec!["2:00 PM".to_string()]);
}

// ── Leaves ───────────────────────────────────────────────────────────────────

#[test]
fn all_day_leave_covers_its_day_but_not_the_end_day() {
    // Midnight-to-midnight leave on the 15th, built in the business zone.
    let leave = LeaveInterval::new(
        "staff-1",
        "Vacation",
        denver(2024, 1, 15, 0, 0),
        denver(2024, 1, 16, 0, 0),
    )
    .unwrap();
    let leaves = vec![leave];

    assert_eq!(leaves_on(&leaves, "staff-1", date("2024-01-15"), TZ).unwrap().len(), 1);
    // End is exclusive at day granularity.
    assert!(leaves_on(&leaves, "staff-1", date("2024-01-16"), TZ).unwrap().is_empty());
    assert!(leaves_on(&leaves, "staff-1", date("2024-01-14"), TZ).unwrap().is_empty());
}

#[test]
fn multi_day_leave_covers_every_interior_day() {
    let leave = LeaveInterval::new(
        "staff-1",
        "Conference",
        denver(2024, 1, 15, 0, 0),
        denver(2024, 1, 18, 0, 0),
    )
    .unwrap();
    let leaves = vec![leave];

    for d in ["2024-01-15", "2024-01-16", "2024-01-17"] {
        assert_eq!(
            leaves_on(&leaves, "staff-1", date(d), TZ).unwrap().len(),
            1,
            "day {} should be covered",
            d
        );
    }
    assert!(leaves_on(&leaves, "staff-1", date("2024-01-18"), TZ).unwrap().is_empty());
}

#[test]
fn leaves_filter_by_staff() {
    let leave = LeaveInterval::new(
        "staff-1",
        "Vacation",
        denver(2024, 1, 15, 0, 0),
        denver(2024, 1, 16, 0, 0),
    )
    .unwrap();
    assert!(leaves_on(&[leave], "staff-2", date("2024-01-15"), TZ).unwrap().is_empty());
}

#[test]
fn leaves_are_order_independent() {
    let a = LeaveInterval::new(
        "staff-1",
        "A",
        denver(2024, 1, 15, 0, 0),
        denver(2024, 1, 16, 0, 0),
    )
    .unwrap();
    let b = LeaveInterval::new(
        "staff-1",
        "B",
        denver(2024, 1, 14, 0, 0),
        denver(2024, 1, 17, 0, 0),
    )
    .unwrap();

    let forward = vec![a.clone(), b.clone()];
    let reversed = vec![b, a];
    let mut labels_fwd: Vec<String> = leaves_on(&forward, "staff-1", date("2024-01-15"), TZ)
        .unwrap()
        .iter()
        .map(|l| l.label.clone())
        .collect();
    let mut labels_rev: Vec<String> = leaves_on(&reversed, "staff-1", date("2024-01-15"), TZ)
        .unwrap()
        .iter()
        .map(|l| l.label.clone())
        .collect();
    labels_fwd.sort();
    labels_rev.sort();
    assert_eq!(labels_fwd, labels_rev);
}

// ── Breaks ───────────────────────────────────────────────────────────────────

#[test]
fn recurring_break_matches_weekday_membership() {
    // 2024-01-15 is a Monday.
    let brk = BreakInterval::recurring(
        "staff-1",
        "Lunch",
        vec![Weekday::Mon, Weekday::Wed],
        720,
        780,
    )
    .unwrap();
    let breaks = vec![brk];

    assert_eq!(breaks_on(&breaks, "staff-1", date("2024-01-15")).len(), 1); // Mon
    assert_eq!(breaks_on(&breaks, "staff-1", date("2024-01-17")).len(), 1); // Wed
    assert!(breaks_on(&breaks, "staff-1", date("2024-01-16")).is_empty()); // Tue
}

#[test]
fn one_off_break_matches_its_date_only() {
    let brk = BreakInterval::one_off("staff-1", "Dentist", date("2024-01-16"), 600, 660).unwrap();
    let breaks = vec![brk];

    assert_eq!(breaks_on(&breaks, "staff-1", date("2024-01-16")).len(), 1);
    assert!(breaks_on(&breaks, "staff-1", date("2024-01-23")).is_empty());
}

#[test]
fn breaks_filter_by_staff() {
    let brk = BreakInterval::recurring("staff-1", "Lunch", vec![Weekday::Mon], 720, 780).unwrap();
    assert!(breaks_on(&[brk], "staff-2", date("2024-01-15")).is_empty());
}

// ── Blocking intervals ───────────────────────────────────────────────────────

#[test]
fn leave_starting_midday_blocks_through_midnight() {
    let leave = LeaveInterval::new(
        "staff-1",
        "Half day",
        denver(2024, 1, 15, 10, 0),
        denver(2024, 1, 17, 0, 0),
    )
    .unwrap();

    let blocks = blocking_intervals(&[leave], &[], "staff-1", date("2024-01-15"), TZ).unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, BlockKind::Leave);
    assert_eq!(blocks[0].start_minute, 600);
    assert_eq!(blocks[0].end_minute, 1440);

    // Interior day: blocked wall to wall.
    let interior = blocking_intervals(
        &[LeaveInterval::new(
            "staff-1",
            "Half day",
            denver(2024, 1, 15, 10, 0),
            denver(2024, 1, 17, 0, 0),
        )
        .unwrap()],
        &[],
        "staff-1",
        date("2024-01-16"),
        TZ,
    )
    .unwrap();
    assert_eq!(interior[0].start_minute, 0);
    assert_eq!(interior[0].end_minute, 1440);
}

#[test]
fn breaks_surface_their_minute_window_and_label() {
    let brk = BreakInterval::recurring("staff-1", "Lunch", vec![Weekday::Mon], 720, 750).unwrap();
    let blocks = blocking_intervals(&[], &[brk], "staff-1", date("2024-01-15"), TZ).unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, BlockKind::Break);
    assert_eq!(blocks[0].label, "Lunch");
    assert_eq!((blocks[0].start_minute, blocks[0].end_minute), (720, 750));
}

#[test]
fn leaves_and_breaks_combine_without_merging() {
    let leave = LeaveInterval::new(
        "staff-1",
        "Vacation",
        denver(2024, 1, 15, 0, 0),
        denver(2024, 1, 16, 0, 0),
    )
    .unwrap();
    let brk = BreakInterval::recurring("staff-1", "Lunch", vec![Weekday::Mon], 720, 750).unwrap();

    // Overlapping blocks are reported independently; stacking is the
    // renderer's concern.
    let blocks = blocking_intervals(&[leave], &[brk], "staff-1", date("2024-01-15"), TZ).unwrap();
    assert_eq!(blocks.len(), 2);
}

// ── Business hours ───────────────────────────────────────────────────────────

#[test]
fn closed_weekday_short_circuits() {
    let mut days = [DayHours::open(540, 1140); 7];
    days[0] = DayHours::closed(); // Sunday
    let hours = BusinessHours { days };

    assert!(day_closed(&hours, date("2024-01-14"))); // Sunday
    assert!(!day_closed(&hours, date("2024-01-15"))); // Monday
}

#[test]
fn open_flag_without_minutes_counts_as_closed() {
    let mut days = [DayHours::open(540, 1140); 7];
    days[1] = DayHours {
        open: true,
        open_minute: None,
        close_minute: None,
    };
    let hours = BusinessHours { days };
    assert!(day_closed(&hours, date("2024-01-15"))); // Monday
}
