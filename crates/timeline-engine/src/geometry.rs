//! Map a slotted entry onto pixel geometry on the timeline grid.
//!
//! Pure and O(1). Degenerate layout constants produce degenerate geometry
//! (e.g. a negative width when padding exceeds half a slot); clamping for
//! display is left to the caller.

use serde::{Deserialize, Serialize};

use crate::entry::ScheduleEntry;
use crate::layout::LayoutConstants;

/// Absolute position of one block, in px from the grid's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub top: f64,
    pub height: f64,
    pub left: f64,
    pub width: f64,
}

/// Width of one sub-column for this entry. A `slot_count` of 0 is treated as 1.
pub fn slot_width<O>(entry: &ScheduleEntry<O>, constants: &LayoutConstants) -> f64 {
    constants.member_column_width / entry.slot_count.max(1) as f64
}

/// Compute the block geometry for `entry` in column `member_index`.
///
/// - `top = (start_min - reference_start_min) * px_per_minute`
/// - `height = (end_min - start_min) * px_per_minute`
/// - `width = slot_width - 2 * padding`
/// - `left = member_index * column_width + slot_index * slot_width + padding`
pub fn map_to_geometry<O>(
    entry: &ScheduleEntry<O>,
    member_index: usize,
    constants: &LayoutConstants,
) -> Geometry {
    let px = constants.px_per_minute;
    let slot_width = slot_width(entry, constants);

    Geometry {
        top: (entry.start_min - constants.reference_start_min()) as f64 * px,
        height: entry.duration_minutes() as f64 * px,
        left: member_index as f64 * constants.member_column_width
            + entry.slot_index as f64 * slot_width
            + constants.padding,
        width: slot_width - 2.0 * constants.padding,
    }
}
