//! Day-grid geometry -- maps timed events onto vertical pixel offsets.
//!
//! The grid is a fixed business-hours window (08:00-20:00 by default) of
//! 30-minute rows. Events are positioned independently: overlapping events
//! get overlapping geometry, and layering them is the renderer's concern.
//! No collision or lane-splitting is performed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::wallclock::minute_of_day;

/// Geometry of the day grid. Deserializable so callers can ship overrides in
/// their schedule documents; `Default` is the standard salon day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// First minute-of-day shown on the grid.
    pub start_minute: u32,
    /// First minute-of-day past the end of the grid (exclusive).
    pub end_minute: u32,
    /// Pixel height of one 30-minute row.
    pub pixels_per_slot: f64,
    pub top_padding_px: f64,
    pub bottom_padding_px: f64,
    /// Blocks never render shorter than this, however brief the event.
    pub min_block_px: f64,
    /// Vertical breathing room subtracted from each block's height.
    pub gap_px: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start_minute: 480,  // 08:00
            end_minute: 1200,   // 20:00
            pixels_per_slot: 60.0,
            top_padding_px: 0.0,
            bottom_padding_px: 0.0,
            min_block_px: 20.0,
            gap_px: 2.0,
        }
    }
}

/// Vertical placement of one event block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockGeometry {
    pub top_px: f64,
    pub height_px: f64,
}

impl GridConfig {
    pub fn validate(&self) -> Result<()> {
        if self.start_minute >= self.end_minute || self.end_minute > 1440 {
            return Err(ScheduleError::InvalidInterval(format!(
                "grid window [{}, {}) out of range",
                self.start_minute, self.end_minute
            )));
        }
        Ok(())
    }

    fn px_per_minute(&self) -> f64 {
        self.pixels_per_slot / 30.0
    }

    /// Place an event by minute-of-day. Returns `None` (hidden) iff the
    /// start lies outside the grid window.
    ///
    /// An event starting inside the window but ending after it is still
    /// shown at full height, never truncated -- it simply extends past the
    /// last row.
    pub fn layout_minutes(&self, start_minute: u32, end_minute: u32) -> Option<BlockGeometry> {
        if start_minute < self.start_minute || start_minute >= self.end_minute {
            return None;
        }
        let ppm = self.px_per_minute();
        let top_px = self.top_padding_px + f64::from(start_minute - self.start_minute) * ppm;
        let raw_height = (f64::from(end_minute) - f64::from(start_minute)) * ppm - self.gap_px;
        Some(BlockGeometry {
            top_px,
            height_px: raw_height.max(self.min_block_px),
        })
    }

    /// Place an event given UTC instants, projecting through the business
    /// timezone's wall clock.
    pub fn layout(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        timezone: &str,
    ) -> Result<Option<BlockGeometry>> {
        let start_minute = minute_of_day(timezone, start)?;
        let end_minute = minute_of_day(timezone, end)?;
        Ok(self.layout_minutes(start_minute, end_minute))
    }

    /// Pixel offset of the "now" line, `None` outside business hours.
    pub fn time_indicator(&self, now: DateTime<Utc>, timezone: &str) -> Result<Option<f64>> {
        let minute = minute_of_day(timezone, now)?;
        if minute < self.start_minute || minute >= self.end_minute {
            return Ok(None);
        }
        Ok(Some(
            self.top_padding_px + f64::from(minute - self.start_minute) * self.px_per_minute(),
        ))
    }

    /// Total rendered height of the grid, paddings included.
    pub fn grid_height(&self) -> f64 {
        self.top_padding_px
            + f64::from(self.end_minute - self.start_minute) * self.px_per_minute()
            + self.bottom_padding_px
    }

    /// Number of 30-minute rows on the grid.
    pub fn row_count(&self) -> u32 {
        (self.end_minute - self.start_minute).div_ceil(30)
    }
}
