//! WASM bindings for slotgrid-core.
//!
//! Exposes wall-clock conversion, slot filtering, availability resolution,
//! grid geometry, and the lockout policy to JavaScript via `wasm-bindgen`.
//! All complex types cross the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slotgrid-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/slotgrid-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slotgrid_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use slotgrid_core::types::{Appointment, BreakInterval, LeaveInterval, SlotsByDate};
use slotgrid_core::GridConfig;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: parse JSON and datetime strings arriving from JavaScript
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts both RFC 3339 (with offset, e.g., "2024-07-15T15:00:00Z") and
/// naive local time ("2024-07-15T15:00:00"), which is interpreted as UTC.
fn parse_instant(s: &str) -> Result<DateTime<Utc>, JsValue> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    s.parse()
        .map_err(|_| JsValue::from_str(&format!("Invalid date '{}': expected YYYY-MM-DD", s)))
}

fn parse_wall_now(s: &str) -> Result<NaiveDateTime, JsValue> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| JsValue::from_str(&format!("Invalid wall-clock datetime '{}': {}", s, e)))
}

fn from_json<'a, T: Deserialize<'a>>(json: &'a str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports: wall clock
// ---------------------------------------------------------------------------

/// Convert wall-clock fields in an IANA timezone to a UTC instant,
/// returned as an RFC 3339 string.
#[wasm_bindgen(js_name = "wallTimeToUtc")]
pub fn wall_time_to_utc(
    timezone: &str,
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
) -> Result<String, JsValue> {
    let instant = slotgrid_core::wall_time_to_utc(timezone, year, month, day, hour, minute)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(instant.to_rfc3339())
}

/// The timezone's offset from UTC at `instant`, in whole minutes.
#[wasm_bindgen(js_name = "utcOffsetMinutes")]
pub fn utc_offset_minutes(timezone: &str, instant: &str) -> Result<i64, JsValue> {
    let instant = parse_instant(instant)?;
    let offset = slotgrid_core::utc_offset(timezone, instant)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(offset.num_minutes())
}

// ---------------------------------------------------------------------------
// WASM exports: slots and availability
// ---------------------------------------------------------------------------

/// Filter a JSON array of slot labels down to those not yet past on `date`
/// at the wall-clock `now`. Returns a JSON array of labels.
#[wasm_bindgen(js_name = "filterFutureSlots")]
pub fn filter_future_slots(labels_json: &str, date: &str, now: &str) -> Result<String, JsValue> {
    let labels: Vec<String> = from_json(labels_json, "labels")?;
    let kept = slotgrid_core::filter_future_slots(&labels, parse_date(date)?, parse_wall_now(now)?);
    to_json(&kept)
}

/// Dates still worth offering from a `{date: [label, ...]}` map, at the
/// wall-clock `now`. Returns a JSON array of YYYY-MM-DD strings.
#[wasm_bindgen(js_name = "availableDates")]
pub fn available_dates(working_slots_json: &str, now: &str) -> Result<String, JsValue> {
    let slots: SlotsByDate = from_json(working_slots_json, "working slots")?;
    let dates = slotgrid_core::available_dates(&slots, parse_wall_now(now)?);
    to_json(&dates)
}

/// Blocking intervals (leaves + breaks) for a staff member on a date.
///
/// `leaves_json` and `breaks_json` are JSON arrays of the engine's leave and
/// break shapes. Returns a JSON array of
/// `{kind, label, start_minute, end_minute}`.
#[wasm_bindgen(js_name = "blockingIntervals")]
pub fn blocking_intervals(
    leaves_json: &str,
    breaks_json: &str,
    staff_id: &str,
    date: &str,
    timezone: &str,
) -> Result<String, JsValue> {
    let leaves: Vec<LeaveInterval> = from_json(leaves_json, "leaves")?;
    let breaks: Vec<BreakInterval> = from_json(breaks_json, "breaks")?;
    let blocks =
        slotgrid_core::blocking_intervals(&leaves, &breaks, staff_id, parse_date(date)?, timezone)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_json(&blocks)
}

// ---------------------------------------------------------------------------
// WASM exports: grid geometry
// ---------------------------------------------------------------------------

/// Lay out one event on the day grid. `config_json` may be `"{}"` for the
/// defaults. Returns `{top_px, height_px}` as JSON, or the string `"null"`
/// when the event is hidden (starts outside the grid window).
#[wasm_bindgen(js_name = "layoutDay")]
pub fn layout_day(
    config_json: &str,
    start: &str,
    end: &str,
    timezone: &str,
) -> Result<String, JsValue> {
    let config: GridConfig = from_json(config_json, "grid config")?;
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let geometry = config
        .layout(parse_instant(start)?, parse_instant(end)?, timezone)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_json(&geometry)
}

/// Pixel offset of the "now" line, or the string `"null"` outside business
/// hours.
#[wasm_bindgen(js_name = "currentTimeIndicator")]
pub fn current_time_indicator(
    config_json: &str,
    now: &str,
    timezone: &str,
) -> Result<String, JsValue> {
    let config: GridConfig = from_json(config_json, "grid config")?;
    let px = config
        .time_indicator(parse_instant(now)?, timezone)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_json(&px)
}

// ---------------------------------------------------------------------------
// WASM exports: policy and planning
// ---------------------------------------------------------------------------

/// Whether an appointment (as JSON) can still be cancelled or rescheduled at
/// the UTC `now`.
#[wasm_bindgen(js_name = "canCancelOrReschedule")]
pub fn can_cancel_or_reschedule(appointment_json: &str, now: &str) -> Result<bool, JsValue> {
    let appointment: Appointment = from_json(appointment_json, "appointment")?;
    Ok(slotgrid_core::can_cancel_or_reschedule(
        &appointment,
        parse_instant(now)?,
        slotgrid_core::lockout_window(),
    ))
}

/// Plan moving an appointment (as JSON) to `slot_label` on `date`. Returns
/// `{appointment_id, start, end, staff_id}` as JSON with UTC ISO-8601
/// instants, or an error when the appointment is locked.
#[wasm_bindgen(js_name = "planReschedule")]
pub fn plan_reschedule(
    appointment_json: &str,
    date: &str,
    slot_label: &str,
    timezone: &str,
    now: &str,
) -> Result<String, JsValue> {
    let appointment: Appointment = from_json(appointment_json, "appointment")?;
    let plan = slotgrid_core::plan_reschedule(
        &appointment,
        parse_date(date)?,
        slot_label,
        timezone,
        parse_instant(now)?,
        slotgrid_core::lockout_window(),
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_json(&plan)
}
