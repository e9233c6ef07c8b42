//! # slotgrid-core
//!
//! Appointment time-grid and slot-availability engine for booking frontends.
//!
//! Converts raw slot, leave, break, and appointment data into a
//! conflict-aware, bookable time grid: DST-correct wall-clock conversion for
//! a fixed business timezone, past-slot filtering of 12-hour labels,
//! per-date/per-staff availability resolution, day-grid pixel geometry, and
//! the mutation-lockout policy that gates cancel/reschedule actions.
//!
//! ## Quick start
//!
//! ```rust
//! use slotgrid_core::wall_time_to_utc;
//!
//! // 09:00 wall time in Denver is UTC-7 in January (MST)...
//! let winter = wall_time_to_utc("America/Denver", 2024, 1, 15, 9, 0).unwrap();
//! assert_eq!(winter.to_rfc3339(), "2024-01-15T16:00:00+00:00");
//!
//! // ...and UTC-6 in July (MDT).
//! let summer = wall_time_to_utc("America/Denver", 2024, 7, 15, 9, 0).unwrap();
//! assert_eq!(summer.to_rfc3339(), "2024-07-15T15:00:00+00:00");
//! ```
//!
//! ## Modules
//!
//! - [`wallclock`] — wall-clock <-> UTC conversion through the IANA tz database
//! - [`slots`] — 12-hour slot-label parsing and past-slot filtering
//! - [`availability`] — bookable dates/slots and blocking intervals per staff
//! - [`grid`] — day-grid pixel geometry for timed events
//! - [`policy`] — cancel/reschedule lockout predicates
//! - [`booking`] — mutation payload planning (reschedule, cancel, new booking)
//! - [`fetch`] — stale-fetch cancellation and the cache port
//! - [`types`] — entities (appointments, leaves, breaks, business hours)
//! - [`error`] — error types

pub mod availability;
pub mod booking;
pub mod error;
pub mod fetch;
pub mod grid;
pub mod policy;
pub mod slots;
pub mod types;
pub mod wallclock;

pub use availability::{
    available_dates, blocking_intervals, breaks_on, day_closed, leaves_on, slots_for_date,
    BlockKind, BlockingInterval,
};
pub use booking::{
    plan_booking, plan_cancel, plan_reschedule, BookingPlan, CancelPlan, ReschedulePlan,
};
pub use error::ScheduleError;
pub use fetch::{CacheEntry, CachePort, CancelToken, FetchGate};
pub use grid::{BlockGeometry, GridConfig};
pub use policy::{can_cancel_or_reschedule, has_ended, is_within_lockout, lockout_window};
pub use slots::{filter_future_slots, is_slot_in_past, parse_slot_label, SlotTime};
pub use types::{
    parse_recurring_days, Appointment, BreakInterval, BusinessHours, DayHours, LeaveInterval,
    PaymentStatus, SlotsByDate,
};
pub use wallclock::{minute_of_day, utc_offset, wall_date, wall_datetime, wall_time_to_utc};
