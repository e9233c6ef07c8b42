//! `slotgrid` CLI — resolve availability, grid geometry, and mutation plans
//! from a JSON schedule document.
//!
//! ## Usage
//!
//! ```sh
//! # Dates still worth offering (reads the document from stdin)
//! slotgrid dates < schedule.json
//!
//! # Bookable slots on a date, past-filtered against --now
//! slotgrid slots -i schedule.json --date 2024-07-15 --now 2024-07-15T09:00:00
//!
//! # Blocking intervals (leaves + breaks) for one staff member on a date
//! slotgrid blocks -i schedule.json --date 2024-07-15 --staff staff-1
//!
//! # Pixel geometry for every appointment on a date
//! slotgrid grid -i schedule.json --date 2024-07-15
//!
//! # Reschedule plan for an appointment, gated by the lockout policy
//! slotgrid plan -i schedule.json --appointment appt-1 \
//!     --date 2024-07-15 --slot "9:00 AM"
//! ```
//!
//! The schedule document carries `timezone`, `working_slots`, `leaves`,
//! `breaks`, and optionally `business_hours`, `grid` overrides, and
//! `appointments`.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde_json::json;
use std::fs;
use std::io::{self, Read};

use slotgrid_core::{
    available_dates, blocking_intervals, day_closed, lockout_window, plan_reschedule,
    slots_for_date, Appointment, BreakInterval, BusinessHours, GridConfig, LeaveInterval,
    SlotsByDate,
};

#[derive(Parser)]
#[command(
    name = "slotgrid",
    version,
    about = "Appointment availability and time-grid engine CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List dates that still have bookable slots
    Dates {
        /// Input schedule document (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Wall-clock "now" for past-slot filtering (defaults to the local clock)
        #[arg(long)]
        now: Option<NaiveDateTime>,
    },
    /// List bookable slots on a date
    Slots {
        /// Input schedule document (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Target calendar date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Wall-clock "now" for past-slot filtering (defaults to the local clock)
        #[arg(long)]
        now: Option<NaiveDateTime>,
    },
    /// List blocking intervals (leaves + breaks) for a staff member on a date
    Blocks {
        /// Input schedule document (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Target calendar date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Staff identifier
        #[arg(long)]
        staff: String,
    },
    /// Compute day-grid geometry for the document's appointments on a date
    Grid {
        /// Input schedule document (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Target calendar date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },
    /// Compute a reschedule plan for an appointment
    Plan {
        /// Input schedule document (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Appointment id from the document's `appointments`
        #[arg(long)]
        appointment: String,
        /// New calendar date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// New slot label, e.g. "9:00 AM"
        #[arg(long)]
        slot: String,
        /// UTC "now" for the lockout gate (defaults to the system clock)
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
}

/// The JSON document every subcommand consumes.
#[derive(Deserialize)]
struct ScheduleDoc {
    timezone: String,
    #[serde(default)]
    working_slots: SlotsByDate,
    #[serde(default)]
    leaves: Vec<LeaveInterval>,
    #[serde(default)]
    breaks: Vec<BreakInterval>,
    #[serde(default)]
    business_hours: Option<BusinessHours>,
    #[serde(default)]
    grid: Option<GridConfig>,
    #[serde(default)]
    appointments: Vec<Appointment>,
}

fn read_input(input: &Option<String>) -> Result<String> {
    match input {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn load_doc(input: &Option<String>) -> Result<ScheduleDoc> {
    let raw = read_input(input)?;
    let doc: ScheduleDoc =
        serde_json::from_str(&raw).context("Failed to parse schedule document")?;
    if let Some(grid) = &doc.grid {
        grid.validate().context("Invalid grid configuration")?;
    }
    for appointment in &doc.appointments {
        appointment
            .validate()
            .context("Invalid appointment in schedule document")?;
    }
    Ok(doc)
}

fn wall_now(now: Option<NaiveDateTime>) -> NaiveDateTime {
    now.unwrap_or_else(|| Local::now().naive_local())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Dates { input, now } => {
            let doc = load_doc(&input)?;
            let dates = available_dates(&doc.working_slots, wall_now(now));
            println!("{}", serde_json::to_string_pretty(&dates)?);
        }
        Commands::Slots { input, date, now } => {
            let doc = load_doc(&input)?;
            if let Some(hours) = &doc.business_hours {
                if day_closed(hours, date) {
                    println!("{}", json!([]));
                    return Ok(());
                }
            }
            let labels = slots_for_date(&doc.working_slots, date, wall_now(now));
            println!("{}", serde_json::to_string_pretty(&labels)?);
        }
        Commands::Blocks {
            input,
            date,
            staff,
        } => {
            let doc = load_doc(&input)?;
            let blocks = blocking_intervals(&doc.leaves, &doc.breaks, &staff, date, &doc.timezone)
                .context("Failed to resolve blocking intervals")?;
            println!("{}", serde_json::to_string_pretty(&blocks)?);
        }
        Commands::Grid { input, date } => {
            let doc = load_doc(&input)?;
            let config = doc.grid.unwrap_or_default();
            let mut placed = Vec::new();
            for appointment in &doc.appointments {
                let Some((start, end)) = appointment.window() else {
                    continue;
                };
                let on_date = slotgrid_core::wall_date(&doc.timezone, start)
                    .context("Failed to project appointment date")?
                    == date;
                if !on_date {
                    continue;
                }
                let geometry = config
                    .layout(start, end, &doc.timezone)
                    .context("Failed to lay out appointment")?;
                placed.push(json!({
                    "id": appointment.id,
                    "geometry": geometry,
                }));
            }
            println!("{}", serde_json::to_string_pretty(&placed)?);
        }
        Commands::Plan {
            input,
            appointment,
            date,
            slot,
            now,
        } => {
            let doc = load_doc(&input)?;
            let Some(target) = doc.appointments.iter().find(|a| a.id == appointment) else {
                bail!("No appointment with id {:?} in the document", appointment);
            };
            let now = now.unwrap_or_else(Utc::now);
            let plan = plan_reschedule(target, date, &slot, &doc.timezone, now, lockout_window())
                .context("Failed to plan reschedule")?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
    }

    Ok(())
}
