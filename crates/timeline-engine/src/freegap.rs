//! Compute free gaps from schedule entries.
//!
//! Sorts entries by start, merges overlapping busy periods, then walks the gaps
//! between merged periods inside a minute window. Pass one member's entries for
//! that member's free time, or everyone's for time the whole team is free.

use serde::Serialize;

use crate::entry::ScheduleEntry;

/// A free stretch of the timeline, in canonical minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreeGap {
    pub start_min: i64,
    pub end_min: i64,
    pub duration_minutes: i64,
}

impl FreeGap {
    fn new(start_min: i64, end_min: i64) -> Self {
        Self {
            start_min,
            end_min,
            duration_minutes: end_min - start_min,
        }
    }
}

/// Merge overlapping or touching busy periods, clipped to the window.
///
/// Returns a sorted, non-overlapping list of `(start, end)` pairs.
fn merge_busy_periods<O>(
    entries: &[ScheduleEntry<O>],
    window_start: i64,
    window_end: i64,
) -> Vec<(i64, i64)> {
    let mut intervals: Vec<(i64, i64)> = entries
        .iter()
        .filter(|e| e.start_min < window_end && e.end_min > window_start)
        .map(|e| (e.start_min.max(window_start), e.end_min.min(window_end)))
        .collect();

    intervals.sort_unstable();

    let mut merged: Vec<(i64, i64)> = Vec::with_capacity(intervals.len());
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    merged
}

/// Find free gaps within `[window_start, window_end)`, sorted by start.
///
/// An empty or inverted window has no gaps.
pub fn find_free_gaps<O>(
    entries: &[ScheduleEntry<O>],
    window_start: i64,
    window_end: i64,
) -> Vec<FreeGap> {
    if window_start >= window_end {
        return Vec::new();
    }

    let merged = merge_busy_periods(entries, window_start, window_end);

    let mut gaps = Vec::new();
    let mut cursor = window_start;

    for &(busy_start, busy_end) in &merged {
        if cursor < busy_start {
            gaps.push(FreeGap::new(cursor, busy_start));
        }
        cursor = cursor.max(busy_end);
    }

    if cursor < window_end {
        gaps.push(FreeGap::new(cursor, window_end));
    }

    gaps
}
