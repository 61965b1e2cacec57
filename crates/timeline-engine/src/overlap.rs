//! Detect double bookings within each member's schedule.
//!
//! Pairwise comparison of entries that share an owner. Entries of different
//! owners never count as overlapping, and touching entries (one ends exactly
//! when the other starts) are not overlaps.

use serde::Serialize;

use crate::entry::ScheduleEntry;

/// Two entries of the same owner whose intervals intersect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlap<O = String> {
    pub entry_a: ScheduleEntry<O>,
    pub entry_b: ScheduleEntry<O>,
    pub overlap_minutes: i64,
}

/// Find all same-owner overlapping pairs.
///
/// Two entries overlap under [`crate::Interval::overlaps`]. The overlap
/// duration is `min(a.end, b.end) - max(a.start, b.start)`. Pairs are reported
/// in input order, `entry_a` always preceding `entry_b`.
pub fn find_overlaps<O>(entries: &[ScheduleEntry<O>]) -> Vec<Overlap<O>>
where
    O: PartialEq + Clone,
{
    let mut overlaps = Vec::new();

    for (i, a) in entries.iter().enumerate() {
        for b in &entries[i + 1..] {
            if a.owner != b.owner {
                continue;
            }
            if a.interval().overlaps(&b.interval()) {
                let overlap_minutes = a.end_min.min(b.end_min) - a.start_min.max(b.start_min);
                overlaps.push(Overlap {
                    entry_a: a.clone(),
                    entry_b: b.clone(),
                    overlap_minutes,
                });
            }
        }
    }

    overlaps
}
