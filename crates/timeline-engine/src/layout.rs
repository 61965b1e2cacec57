//! Layout constants for the shared timeline grid.
//!
//! The grid has one column per member (x) and one row per minute (y), starting
//! at `start_hour`. The same hour is the day-wrap reference for normalization,
//! so entry minutes and the grid origin always agree.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::Result;
use crate::normalize::DayWrap;

/// Grid configuration supplied by the presentation layer. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConstants {
    /// Width of one member column, in px.
    pub member_column_width: f64,
    /// Vertical px per minute.
    pub px_per_minute: f64,
    /// Horizontal inset on each side of a block, in px.
    pub padding: f64,
    /// First hour shown on the grid; also the day-wrap reference.
    pub start_hour: u32,
    /// Number of hours shown, wrapping past midnight if needed.
    pub visible_hours: u32,
}

impl Default for LayoutConstants {
    fn default() -> Self {
        Self {
            member_column_width: 120.0,
            px_per_minute: 1.0,
            padding: 2.0,
            start_hour: 6,
            visible_hours: 24,
        }
    }
}

/// A degenerate layout setting.
///
/// These never stop the geometry mapper, which passes degenerate geometry
/// through unchanged. They exist so a caller can report the setting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationIssue {
    #[error("member column width must be positive, got {0}")]
    NonPositiveColumnWidth(f64),

    #[error("px per minute must be positive, got {0}")]
    NonPositivePxPerMinute(f64),

    #[error("padding {padding} leaves no room in a {column_width}px column")]
    ExcessivePadding { padding: f64, column_width: f64 },

    #[error("start hour {0} is outside 0-23")]
    StartHourOutOfRange(u32),

    #[error("visible hours must be at least 1")]
    NoVisibleHours,
}

impl LayoutConstants {
    /// Canonical minute of the grid's top edge.
    ///
    /// `start_hour` is its own day-wrap reference, so it is never offset.
    pub fn reference_start_min(&self) -> i64 {
        i64::from(self.start_hour) * 60
    }

    /// The day wrap entry times must be normalized with to line up with this grid.
    ///
    /// # Errors
    /// Returns `TimelineError::InvalidReferenceHour` if `start_hour` is above 23.
    pub fn day_wrap(&self) -> Result<DayWrap> {
        DayWrap::new(self.start_hour)
    }

    /// Canonical `[start, end)` minute window covered by the grid.
    pub fn visible_window(&self) -> (i64, i64) {
        let start = self.reference_start_min();
        (start, start + i64::from(self.visible_hours) * 60)
    }

    /// Hour labels down the side of the grid, e.g. `6..=23` then `0..=5`.
    pub fn hour_labels(&self) -> Vec<u32> {
        (0..self.visible_hours)
            .map(|h| (self.start_hour + h) % 24)
            .collect()
    }

    pub fn grid_height(&self) -> f64 {
        f64::from(self.visible_hours) * 60.0 * self.px_per_minute
    }

    pub fn grid_width(&self, columns: usize) -> f64 {
        columns as f64 * self.member_column_width
    }

    /// Every degenerate setting in this layout. Empty means the layout is sound.
    pub fn issues(&self) -> Vec<ConfigurationIssue> {
        let mut issues = Vec::new();

        if self.member_column_width <= 0.0 {
            issues.push(ConfigurationIssue::NonPositiveColumnWidth(
                self.member_column_width,
            ));
        } else if self.padding * 2.0 >= self.member_column_width {
            issues.push(ConfigurationIssue::ExcessivePadding {
                padding: self.padding,
                column_width: self.member_column_width,
            });
        }
        if self.px_per_minute <= 0.0 {
            issues.push(ConfigurationIssue::NonPositivePxPerMinute(self.px_per_minute));
        }
        if self.start_hour > 23 {
            issues.push(ConfigurationIssue::StartHourOutOfRange(self.start_hour));
        }
        if self.visible_hours == 0 {
            issues.push(ConfigurationIssue::NoVisibleHours);
        }

        issues
    }
}
