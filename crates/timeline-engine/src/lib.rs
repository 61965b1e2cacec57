//! # timeline-engine
//!
//! Slot assignment and pixel layout for team schedule timelines.
//!
//! Each member's schedule is a set of time intervals. The engine resolves
//! overlapping intervals of one member into side-by-side sub-columns ("slots")
//! and maps every interval onto a shared grid: one column per member across,
//! minutes down. It is recomputed from scratch on every render pass.
//!
//! ## Quick start
//!
//! ```rust
//! use timeline_engine::{assign_slots, map_to_geometry, LayoutConstants, ScheduleEntry, SlotCountPolicy};
//!
//! let mut entries = vec![
//!     ScheduleEntry::new("u1", 540, 600, "meeting").unwrap(),
//!     ScheduleEntry::new("u1", 570, 630, "review").unwrap(),
//! ];
//! assign_slots(&mut entries, SlotCountPolicy::GroupMaximum);
//! assert_eq!(entries[1].slot_index, 1);
//!
//! let layout = LayoutConstants { start_hour: 8, ..LayoutConstants::default() };
//! let geometry = map_to_geometry(&entries[1], 0, &layout);
//! assert_eq!(geometry.top, 90.0);
//! ```
//!
//! ## Modules
//!
//! - [`normalize`] -- clock strings / hour-minute pairs → canonical minutes, with day wrap
//! - [`entry`] -- `ScheduleEntry`, the unit the engine operates on
//! - [`slots`] -- per-owner overlap resolution into slot indices
//! - [`geometry`] -- slotted entry → top/height/left/width
//! - [`layout`] -- grid configuration and its sanity checks
//! - [`columns`] -- owner → member column index
//! - [`timeline`] -- the full render pass over raw records
//! - [`overlap`] -- same-owner double-booking report
//! - [`freegap`] -- free time within a window
//! - [`error`] -- Error types

pub mod columns;
pub mod entry;
pub mod error;
pub mod freegap;
pub mod geometry;
pub mod layout;
pub mod normalize;
pub mod overlap;
pub mod slots;
pub mod timeline;

pub use columns::MemberColumns;
pub use entry::ScheduleEntry;
pub use error::TimelineError;
pub use freegap::{find_free_gaps, FreeGap};
pub use geometry::{map_to_geometry, Geometry};
pub use layout::{ConfigurationIssue, LayoutConstants};
pub use normalize::{format_clock, normalize, DayWrap, HourMinute, Interval, RawInterval, RawTime};
pub use overlap::{find_overlaps, Overlap};
pub use slots::{assign_slots, SlotCountPolicy};
pub use timeline::{
    build_timeline, build_timeline_decoded, decode_records, entries_from_decoded,
    entries_from_records, DecodedRecord, PlacedEntry, ScheduleRecord, SkipReason, SkippedRecord,
    TimelineLayout,
};
