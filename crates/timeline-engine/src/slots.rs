//! Slot assignment -- resolve overlapping entries into side-by-side sub-columns.
//!
//! Entries are grouped by owner and each group is swept in start order. An
//! active set holds the entries still open at the current start time; every new
//! entry takes the smallest slot index not held by an active entry. Groups never
//! share state, so one member's double booking cannot narrow another's column.
//!
//! The active set is scanned linearly, O(n^2) per group in the worst case. Group
//! sizes are one person's daily schedule.

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entry::ScheduleEntry;

/// How `slot_count` is stamped onto entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlotCountPolicy {
    /// Every entry in an owner group gets the group's highest `slot_index + 1`.
    /// All blocks of one member share a width, and `slot_index < slot_count`
    /// always holds, so sub-columns never spill into a neighbouring member.
    #[default]
    GroupMaximum,
    /// Each time an entry is placed, every entry still active (including the new
    /// one) gets the current active-set size. A later step may overwrite an
    /// earlier value while an entry is still open; once an entry closes its
    /// value is frozen.
    ActiveSnapshot,
}

/// Assign `slot_index` and `slot_count` to every entry, in place.
///
/// Within an owner group entries are processed by ascending `start_min`, ties
/// broken by position in `entries`, which makes the result deterministic for a
/// given input order. An entry ending exactly when another starts does not
/// overlap it.
///
/// Entries must satisfy `start_min < end_min`; [`ScheduleEntry::new`] enforces
/// this at construction.
pub fn assign_slots<O>(entries: &mut [ScheduleEntry<O>], policy: SlotCountPolicy)
where
    O: Eq + Hash + Clone,
{
    let mut groups: HashMap<O, Vec<usize>> = HashMap::new();
    for (idx, entry) in entries.iter().enumerate() {
        groups.entry(entry.owner.clone()).or_default().push(idx);
    }

    for (_, mut order) in groups {
        // `order` is ascending by input index; a stable sort keeps that for ties.
        order.sort_by_key(|&idx| entries[idx].start_min);
        let slot_count = assign_group(entries, &order, policy);
        debug!(entries = order.len(), slot_count, ?policy, "assigned owner group");
    }
}

/// Sweep one owner group. Returns the number of slots the group needed.
fn assign_group<O>(entries: &mut [ScheduleEntry<O>], order: &[usize], policy: SlotCountPolicy) -> usize {
    let mut active: Vec<usize> = Vec::new();
    let mut slots_used = 0;

    for &idx in order {
        let start = entries[idx].start_min;
        active.retain(|&open| entries[open].end_min > start);

        let slot = smallest_free_slot(entries, &active);
        entries[idx].slot_index = slot;
        active.push(idx);
        slots_used = slots_used.max(slot + 1);

        if policy == SlotCountPolicy::ActiveSnapshot {
            let count = active.len();
            for &open in &active {
                entries[open].slot_count = count;
            }
        }
    }

    if policy == SlotCountPolicy::GroupMaximum {
        for &idx in order {
            entries[idx].slot_count = slots_used;
        }
    }

    slots_used
}

fn smallest_free_slot<O>(entries: &[ScheduleEntry<O>], active: &[usize]) -> usize {
    // With n active entries at least one of 0..=n is free.
    (0..=active.len())
        .find(|slot| !active.iter().any(|&open| entries[open].slot_index == *slot))
        .unwrap_or(active.len())
}
