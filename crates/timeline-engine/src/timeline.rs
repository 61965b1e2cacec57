//! One render pass: raw records in, positioned blocks out.
//!
//! Normalize each record, validate its duration, give its owner a column,
//! assign slots across all surviving entries, then map every entry to geometry.
//! Nothing is cached between passes; call again whenever the data changes.
//!
//! Records that cannot be placed are left out of the layout and listed in
//! [`TimelineLayout::skipped`] with the reason. That includes batch elements
//! that do not even have the record shape, when the batch is read with
//! [`decode_records`].

use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::columns::MemberColumns;
use crate::entry::ScheduleEntry;
use crate::error::{Result, TimelineError};
use crate::geometry::{map_to_geometry, Geometry};
use crate::layout::LayoutConstants;
use crate::normalize::{normalize, DayWrap, RawInterval};
use crate::slots::{assign_slots, SlotCountPolicy};

/// A schedule record as delivered by the schedule-data provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord<O = String> {
    pub owner: O,
    #[serde(flatten)]
    pub interval: RawInterval,
    #[serde(default)]
    pub flag: String,
}

/// One element of a decoded record batch: the record, or why it could not be read.
pub type DecodedRecord<O = String> = std::result::Result<ScheduleRecord<O>, TimelineError>;

/// Read a JSON array of schedule records, one element at a time.
///
/// A wrong-shaped element (a numeric hour, a missing `end`) becomes a
/// `MalformedRecord` at its own index instead of failing its neighbours.
///
/// # Errors
/// Returns `TimelineError::InvalidBatch` if `json` is not a JSON array.
pub fn decode_records<O: DeserializeOwned>(json: &str) -> Result<Vec<DecodedRecord<O>>> {
    let values: Vec<Value> =
        serde_json::from_str(json).map_err(|e| TimelineError::InvalidBatch(e.to_string()))?;
    Ok(values
        .into_iter()
        .map(|value| {
            serde_json::from_value(value).map_err(|e| TimelineError::MalformedRecord(e.to_string()))
        })
        .collect())
}

/// An entry placed on the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedEntry<O = String> {
    /// Position of the source record in the input.
    pub record_index: usize,
    pub member_index: usize,
    #[serde(flatten)]
    pub entry: ScheduleEntry<O>,
    pub geometry: Geometry,
}

/// Why a record was left off the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    Unparseable { message: String },
    InvalidDuration { start_min: i64, end_min: i64 },
    UnknownMember,
}

impl From<TimelineError> for SkipReason {
    fn from(err: TimelineError) -> Self {
        match err {
            TimelineError::InvalidDuration { start_min, end_min } => {
                SkipReason::InvalidDuration { start_min, end_min }
            }
            other => SkipReason::Unparseable {
                message: other.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    pub record_index: usize,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Everything the presentation layer needs to draw one timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineLayout<O = String> {
    /// Owner id of each column, left to right.
    pub columns: Vec<O>,
    /// Placed entries, in input record order.
    pub placed: Vec<PlacedEntry<O>>,
    pub skipped: Vec<SkippedRecord>,
    pub hour_labels: Vec<u32>,
    pub grid_width: f64,
    pub grid_height: f64,
}

/// Normalize and validate every record on the given day wrap.
///
/// Returns the surviving entries paired with their record index, and the
/// records that were rejected.
pub fn entries_from_records<O: Clone>(
    records: &[ScheduleRecord<O>],
    wrap: DayWrap,
) -> (Vec<(usize, ScheduleEntry<O>)>, Vec<SkippedRecord>) {
    collect_entries(records.iter().map(Ok::<_, &TimelineError>), wrap)
}

/// [`entries_from_records`] over a batch from [`decode_records`]. Elements that
/// failed to decode are skipped as unparseable.
pub fn entries_from_decoded<O: Clone>(
    records: &[DecodedRecord<O>],
    wrap: DayWrap,
) -> (Vec<(usize, ScheduleEntry<O>)>, Vec<SkippedRecord>) {
    collect_entries(records.iter().map(|r| r.as_ref()), wrap)
}

fn collect_entries<'a, O: Clone + 'a>(
    records: impl Iterator<Item = std::result::Result<&'a ScheduleRecord<O>, &'a TimelineError>>,
    wrap: DayWrap,
) -> (Vec<(usize, ScheduleEntry<O>)>, Vec<SkippedRecord>) {
    let mut entries = Vec::new();
    let mut skipped = Vec::new();

    for (record_index, record) in records.enumerate() {
        let entry = record.map_err(Clone::clone).and_then(|record| {
            normalize(&record.interval, wrap).and_then(|interval| {
                ScheduleEntry::from_interval(record.owner.clone(), interval, record.flag.as_str())
            })
        });
        match entry {
            Ok(entry) => entries.push((record_index, entry)),
            Err(err) => {
                warn!(record_index, error = %err, "skipping schedule record");
                skipped.push(SkippedRecord {
                    record_index,
                    reason: err.into(),
                });
            }
        }
    }

    (entries, skipped)
}

/// Run the full normalize, assign, map pipeline over `records`.
///
/// # Errors
/// Returns `TimelineError::InvalidReferenceHour` if `constants.start_hour` is
/// not a valid hour. Per-record failures never fail the pass.
pub fn build_timeline<O>(
    records: &[ScheduleRecord<O>],
    columns: MemberColumns<O>,
    constants: &LayoutConstants,
    policy: SlotCountPolicy,
) -> Result<TimelineLayout<O>>
where
    O: Eq + Hash + Clone,
{
    let wrap = constants.day_wrap()?;
    let (normalized, skipped) = entries_from_records(records, wrap);
    Ok(place_entries(normalized, skipped, columns, constants, policy))
}

/// [`build_timeline`] over a batch from [`decode_records`].
///
/// # Errors
/// Returns `TimelineError::InvalidReferenceHour` if `constants.start_hour` is
/// not a valid hour.
pub fn build_timeline_decoded<O>(
    records: &[DecodedRecord<O>],
    columns: MemberColumns<O>,
    constants: &LayoutConstants,
    policy: SlotCountPolicy,
) -> Result<TimelineLayout<O>>
where
    O: Eq + Hash + Clone,
{
    let wrap = constants.day_wrap()?;
    let (normalized, skipped) = entries_from_decoded(records, wrap);
    Ok(place_entries(normalized, skipped, columns, constants, policy))
}

fn place_entries<O>(
    normalized: Vec<(usize, ScheduleEntry<O>)>,
    mut skipped: Vec<SkippedRecord>,
    mut columns: MemberColumns<O>,
    constants: &LayoutConstants,
    policy: SlotCountPolicy,
) -> TimelineLayout<O>
where
    O: Eq + Hash + Clone,
{
    let mut entries: Vec<ScheduleEntry<O>> = Vec::with_capacity(normalized.len());
    let mut positions: Vec<(usize, usize)> = Vec::with_capacity(normalized.len());

    for (record_index, entry) in normalized {
        let Some(member_index) = columns.resolve(&entry.owner) else {
            warn!(record_index, "skipping schedule record for unknown member");
            skipped.push(SkippedRecord {
                record_index,
                reason: SkipReason::UnknownMember,
            });
            continue;
        };
        entries.push(entry);
        positions.push((record_index, member_index));
    }
    skipped.sort_by_key(|s| s.record_index);

    assign_slots(&mut entries, policy);

    let placed: Vec<PlacedEntry<O>> = entries
        .into_iter()
        .zip(positions)
        .map(|(entry, (record_index, member_index))| PlacedEntry {
            record_index,
            member_index,
            geometry: map_to_geometry(&entry, member_index, constants),
            entry,
        })
        .collect();

    debug!(
        placed = placed.len(),
        skipped = skipped.len(),
        columns = columns.len(),
        "built timeline"
    );

    TimelineLayout {
        grid_width: constants.grid_width(columns.len()),
        grid_height: constants.grid_height(),
        hour_labels: constants.hour_labels(),
        columns: columns.into_members(),
        placed,
        skipped,
    }
}
