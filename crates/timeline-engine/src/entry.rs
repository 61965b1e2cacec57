//! The schedule entry the slot assigner and geometry mapper operate on.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};
use crate::normalize::Interval;

fn default_slot_count() -> usize {
    1
}

/// One member's schedule block on the canonical minute axis.
///
/// `O` is the owner (member/user) identifier. It only needs equality and
/// hashing, so numeric ids and string ids work alike.
///
/// `slot_index` and `slot_count` are outputs of [`crate::assign_slots`]; a freshly
/// constructed entry sits in slot 0 of 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry<O = String> {
    pub owner: O,
    pub start_min: i64,
    pub end_min: i64,
    #[serde(default)]
    pub slot_index: usize,
    #[serde(default = "default_slot_count")]
    pub slot_count: usize,
    /// Category label, used only for colour-coding.
    #[serde(default)]
    pub flag: String,
}

impl<O> ScheduleEntry<O> {
    /// Build an entry, rejecting zero or negative durations.
    ///
    /// # Errors
    /// Returns `TimelineError::InvalidDuration` if `start_min >= end_min`.
    pub fn new(owner: O, start_min: i64, end_min: i64, flag: impl Into<String>) -> Result<Self> {
        if start_min >= end_min {
            return Err(TimelineError::InvalidDuration { start_min, end_min });
        }
        Ok(Self {
            owner,
            start_min,
            end_min,
            slot_index: 0,
            slot_count: 1,
            flag: flag.into(),
        })
    }

    pub fn from_interval(owner: O, interval: Interval, flag: impl Into<String>) -> Result<Self> {
        Self::new(owner, interval.start_min, interval.end_min, flag)
    }

    pub fn interval(&self) -> Interval {
        Interval {
            start_min: self.start_min,
            end_min: self.end_min,
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        self.end_min - self.start_min
    }

    /// Re-check the duration invariant, e.g. after deserializing entries that
    /// did not go through [`ScheduleEntry::new`].
    pub fn validate(&self) -> Result<()> {
        if self.start_min >= self.end_min {
            return Err(TimelineError::InvalidDuration {
                start_min: self.start_min,
                end_min: self.end_min,
            });
        }
        Ok(())
    }
}
