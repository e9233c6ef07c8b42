//! Error types for slotgrid operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid wall-clock time: {0}")]
    InvalidWallTime(String),

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Unparseable slot label: {0}")]
    InvalidSlotLabel(String),

    #[error("Appointment can no longer be modified: {0}")]
    MutationLocked(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
