//! Interval normalization -- converts raw clock encodings into canonical minutes.
//!
//! Two encodings arrive from the schedule-data provider: clock strings
//! (`"HH:MM"` or `"HH:MM:SS"`) and `{hour, minute}` string pairs. Both are reduced
//! to integer minutes since midnight, then shifted onto a [`DayWrap`] so that
//! displays spanning midnight keep ordering and subtraction correct.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};

/// Number of minutes in one day.
pub const MINUTES_PER_DAY: i64 = 1440;

/// Day-wrap reference for displays that start at an hour other than midnight.
///
/// Times of day before the reference hour belong to the *next* day and are
/// offset by [`MINUTES_PER_DAY`]. With a reference of 6 the display runs
/// 06:00 .. 23:59 and then 00:00 .. 05:59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayWrap {
    reference_hour: u32,
}

impl DayWrap {
    /// Create a day wrap anchored at `reference_hour` (0-23).
    ///
    /// # Errors
    /// Returns `TimelineError::InvalidReferenceHour` for hours above 23.
    pub fn new(reference_hour: u32) -> Result<Self> {
        if reference_hour > 23 {
            return Err(TimelineError::InvalidReferenceHour(reference_hour));
        }
        Ok(Self { reference_hour })
    }

    /// A plain midnight-to-midnight day.
    pub const fn midnight() -> Self {
        Self { reference_hour: 0 }
    }

    pub fn reference_hour(&self) -> u32 {
        self.reference_hour
    }

    /// Canonical minute of the reference hour itself.
    pub fn reference_minute(&self) -> i64 {
        i64::from(self.reference_hour) * 60
    }

    /// Place a start time (minute of day) on the wrapped axis.
    pub fn start_minutes(&self, minute_of_day: i64) -> i64 {
        if minute_of_day < self.reference_minute() {
            minute_of_day + MINUTES_PER_DAY
        } else {
            minute_of_day
        }
    }

    /// Place an end time (minute of day) on the wrapped axis.
    ///
    /// An end exactly on the reference boundary closes the display day, so
    /// `22:00-06:00` with reference 6 (or `23:00-00:00` with reference 0)
    /// keeps a positive duration. [`normalize`] does not apply this to an end
    /// equal to its start.
    pub fn end_minutes(&self, minute_of_day: i64) -> i64 {
        if minute_of_day <= self.reference_minute() {
            minute_of_day + MINUTES_PER_DAY
        } else {
            minute_of_day
        }
    }
}

/// An `{hour, minute}` pair as stored by the schedule-data provider.
///
/// A missing (empty) minute means `:00`. A malformed one is an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourMinute {
    pub hour: String,
    #[serde(default)]
    pub minute: String,
}

impl HourMinute {
    pub fn new(hour: impl Into<String>, minute: impl Into<String>) -> Self {
        Self {
            hour: hour.into(),
            minute: minute.into(),
        }
    }

    /// Minutes since midnight.
    ///
    /// # Errors
    /// Returns `TimelineError::Parse` if the hour is missing, either component is
    /// non-numeric, or a component is out of range.
    pub fn minute_of_day(&self) -> Result<i64> {
        let input = format!("{}:{}", self.hour, self.minute);

        let hour_str = self.hour.trim();
        if hour_str.is_empty() {
            return Err(TimelineError::parse(&input, "missing hour"));
        }
        let hour: u32 = hour_str
            .parse()
            .map_err(|_| TimelineError::parse(&input, "hour is not a number"))?;
        if hour > 23 {
            return Err(TimelineError::parse(&input, "hour out of range (0-23)"));
        }

        let minute_str = self.minute.trim();
        let minute: u32 = if minute_str.is_empty() {
            0
        } else {
            minute_str
                .parse()
                .map_err(|_| TimelineError::parse(&input, "minute is not a number"))?
        };
        if minute > 59 {
            return Err(TimelineError::parse(&input, "minute out of range (0-59)"));
        }

        Ok(i64::from(hour) * 60 + i64::from(minute))
    }
}

/// Parse a `"HH:MM"` or `"HH:MM:SS"` clock string into minutes since midnight.
///
/// Seconds are accepted but truncated.
///
/// # Errors
/// Returns `TimelineError::Parse` for anything chrono cannot read as a time of day.
pub fn parse_clock(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    let time = NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|e| TimelineError::parse(input, e.to_string()))?;
    Ok(i64::from(time.hour()) * 60 + i64::from(time.minute()))
}

/// Format a canonical minute as a `"HH:MM"` clock string, folding wrapped
/// minutes back onto the 24-hour clock.
pub fn format_clock(minutes: i64) -> String {
    let m = minutes.rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// One endpoint of a raw interval, in either supported encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTime {
    Clock(String),
    HourMinute(HourMinute),
}

impl RawTime {
    /// Minutes since midnight, before any day-wrap offset.
    pub fn minute_of_day(&self) -> Result<i64> {
        match self {
            RawTime::Clock(s) => parse_clock(s),
            RawTime::HourMinute(hm) => hm.minute_of_day(),
        }
    }
}

impl From<&str> for RawTime {
    fn from(s: &str) -> Self {
        RawTime::Clock(s.to_string())
    }
}

impl From<HourMinute> for RawTime {
    fn from(hm: HourMinute) -> Self {
        RawTime::HourMinute(hm)
    }
}

/// A start/end pair exactly as the data provider hands it over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInterval {
    pub start: RawTime,
    pub end: RawTime,
}

impl RawInterval {
    pub fn new(start: impl Into<RawTime>, end: impl Into<RawTime>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// A canonical `[start_min, end_min)` interval on the wrapped minute axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start_min: i64,
    pub end_min: i64,
}

impl Interval {
    pub fn duration_minutes(&self) -> i64 {
        self.end_min - self.start_min
    }

    /// Closed-open overlap: touching intervals do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start_min < other.end_min && other.start_min < self.end_min
    }
}

/// Normalize a raw interval onto the wrapped minute axis.
///
/// This does not check that the result has a positive duration; that happens
/// when a [`crate::ScheduleEntry`] is constructed from it. Equal endpoints stay
/// equal, so `06:00-06:00` on a 06:00 display is a zero-length interval rather
/// than a full day.
///
/// # Errors
/// Returns `TimelineError::Parse` if either endpoint is malformed.
pub fn normalize(raw: &RawInterval, wrap: DayWrap) -> Result<Interval> {
    let start = raw.start.minute_of_day()?;
    let end = raw.end.minute_of_day()?;
    let end_min = if end == start {
        wrap.start_minutes(end)
    } else {
        wrap.end_minutes(end)
    };
    Ok(Interval {
        start_min: wrap.start_minutes(start),
        end_min,
    })
}
