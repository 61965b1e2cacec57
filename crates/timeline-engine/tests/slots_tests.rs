//! Tests for per-owner slot assignment.

use timeline_engine::{assign_slots, ScheduleEntry, SlotCountPolicy, TimelineError};

fn entry(owner: &str, start: i64, end: i64) -> ScheduleEntry {
    ScheduleEntry::new(owner.to_string(), start, end, "").unwrap()
}

fn slots(entries: &[ScheduleEntry]) -> Vec<usize> {
    entries.iter().map(|e| e.slot_index).collect()
}

fn counts(entries: &[ScheduleEntry]) -> Vec<usize> {
    entries.iter().map(|e| e.slot_count).collect()
}

// ── Construction ────────────────────────────────────────────────────────────

#[test]
fn zero_and_negative_durations_rejected_at_construction() {
    assert_eq!(
        ScheduleEntry::new("u1", 600, 600, "").unwrap_err(),
        TimelineError::InvalidDuration { start_min: 600, end_min: 600 }
    );
    assert!(ScheduleEntry::new("u1", 660, 600, "").is_err());
}

#[test]
fn new_entry_sits_in_slot_zero_of_one() {
    let e = entry("u1", 540, 600);
    assert_eq!((e.slot_index, e.slot_count), (0, 1));
}

// ── Slot indices ────────────────────────────────────────────────────────────

#[test]
fn touching_intervals_share_slot_zero() {
    let mut entries = vec![entry("u1", 540, 600), entry("u1", 600, 660)];
    assign_slots(&mut entries, SlotCountPolicy::GroupMaximum);
    assert_eq!(slots(&entries), vec![0, 0]);
    assert_eq!(counts(&entries), vec![1, 1]);
}

#[test]
fn three_way_overlap_uses_three_slots() {
    // A=[540,600) B=[570,630) C=[580,590)
    let mut entries = vec![entry("u1", 540, 600), entry("u1", 570, 630), entry("u1", 580, 590)];
    assign_slots(&mut entries, SlotCountPolicy::GroupMaximum);
    assert_eq!(slots(&entries), vec![0, 1, 2]);
    assert_eq!(counts(&entries), vec![3, 3, 3]);
}

#[test]
fn freed_slot_is_reused() {
    // A=[540,600) B=[550,700) C=[610,650): A has closed by C, so C takes slot 0.
    let mut entries = vec![entry("u1", 540, 600), entry("u1", 550, 700), entry("u1", 610, 650)];
    assign_slots(&mut entries, SlotCountPolicy::GroupMaximum);
    assert_eq!(slots(&entries), vec![0, 1, 0]);
}

#[test]
fn smallest_free_slot_fills_a_hole() {
    // Slots 0,1,2 taken; slot 1 frees first; D must take 1, not 3.
    let mut entries = vec![
        entry("u1", 0, 100),
        entry("u1", 10, 50),
        entry("u1", 20, 100),
        entry("u1", 60, 90),
    ];
    assign_slots(&mut entries, SlotCountPolicy::GroupMaximum);
    assert_eq!(slots(&entries), vec![0, 1, 2, 1]);
}

#[test]
fn input_order_does_not_need_to_be_sorted() {
    let mut entries = vec![entry("u1", 580, 590), entry("u1", 570, 630), entry("u1", 540, 600)];
    assign_slots(&mut entries, SlotCountPolicy::GroupMaximum);
    // Sorted: [540,600) -> 0, [570,630) -> 1, [580,590) -> 2
    assert_eq!(slots(&entries), vec![2, 1, 0]);
}

#[test]
fn identical_starts_break_ties_by_input_order() {
    let mut entries = vec![entry("u1", 540, 700), entry("u1", 540, 560), entry("u1", 540, 600)];
    assign_slots(&mut entries, SlotCountPolicy::GroupMaximum);
    assert_eq!(slots(&entries), vec![0, 1, 2]);
}

#[test]
fn owners_are_independent() {
    let mut entries = vec![
        entry("u1", 540, 600),
        entry("u2", 540, 600),
        entry("u1", 570, 630),
        entry("u2", 700, 760),
    ];
    assign_slots(&mut entries, SlotCountPolicy::GroupMaximum);
    assert_eq!(slots(&entries), vec![0, 0, 1, 0]);
    assert_eq!(counts(&entries), vec![2, 1, 2, 1]);
}

#[test]
fn numeric_owner_ids_work() {
    let mut entries = vec![
        ScheduleEntry::new(7u64, 540, 600, "").unwrap(),
        ScheduleEntry::new(7u64, 550, 610, "").unwrap(),
        ScheduleEntry::new(9u64, 550, 610, "").unwrap(),
    ];
    assign_slots(&mut entries, SlotCountPolicy::GroupMaximum);
    assert_eq!(
        entries.iter().map(|e| e.slot_index).collect::<Vec<_>>(),
        vec![0, 1, 0]
    );
}

#[test]
fn empty_input_is_a_no_op() {
    let mut entries: Vec<ScheduleEntry> = Vec::new();
    assign_slots(&mut entries, SlotCountPolicy::GroupMaximum);
    assert!(entries.is_empty());
}

#[test]
fn reassignment_starts_from_scratch() {
    let mut entries = vec![entry("u1", 540, 600), entry("u1", 570, 630)];
    assign_slots(&mut entries, SlotCountPolicy::GroupMaximum);
    let first = entries.clone();

    // Stale annotations from a previous pass must not leak in.
    entries[0].slot_index = 5;
    entries[1].slot_count = 9;
    assign_slots(&mut entries, SlotCountPolicy::GroupMaximum);
    assert_eq!(entries, first);
}

// ── Slot-count policies ─────────────────────────────────────────────────────

#[test]
fn group_maximum_stamps_whole_group() {
    // Only the first two overlap, but the later, lone entry still gets 2.
    let mut entries = vec![entry("u1", 540, 600), entry("u1", 570, 630), entry("u1", 700, 760)];
    assign_slots(&mut entries, SlotCountPolicy::GroupMaximum);
    assert_eq!(counts(&entries), vec![2, 2, 2]);
}

#[test]
fn active_snapshot_reflects_concurrency_at_each_step() {
    let mut entries = vec![entry("u1", 540, 600), entry("u1", 570, 630), entry("u1", 700, 760)];
    assign_slots(&mut entries, SlotCountPolicy::ActiveSnapshot);
    assert_eq!(slots(&entries), vec![0, 1, 0]);
    assert_eq!(counts(&entries), vec![2, 2, 1]);
}

#[test]
fn active_snapshot_overwrites_while_open_then_freezes() {
    // A=[0,100) B=[10,20) C=[30,40)
    // step A: {A} -> A=1
    // step B: {A,B} -> A=2, B=2
    // step C: B closed, {A,C} -> A=2, C=2; B keeps 2
    let mut entries = vec![entry("u1", 0, 100), entry("u1", 10, 20), entry("u1", 30, 40)];
    assign_slots(&mut entries, SlotCountPolicy::ActiveSnapshot);
    assert_eq!(slots(&entries), vec![0, 1, 1]);
    assert_eq!(counts(&entries), vec![2, 2, 2]);
}

#[test]
fn policies_agree_on_slot_indices() {
    let base = vec![
        entry("u1", 0, 100),
        entry("u1", 10, 50),
        entry("u1", 20, 100),
        entry("u1", 60, 90),
        entry("u2", 0, 30),
    ];
    let mut group = base.clone();
    let mut snapshot = base;
    assign_slots(&mut group, SlotCountPolicy::GroupMaximum);
    assign_slots(&mut snapshot, SlotCountPolicy::ActiveSnapshot);
    assert_eq!(slots(&group), slots(&snapshot));
}

#[test]
fn policy_serde_names() {
    assert_eq!(
        serde_json::to_string(&SlotCountPolicy::GroupMaximum).unwrap(),
        r#""group-maximum""#
    );
    let p: SlotCountPolicy = serde_json::from_str(r#""active-snapshot""#).unwrap();
    assert_eq!(p, SlotCountPolicy::ActiveSnapshot);
    assert_eq!(SlotCountPolicy::default(), SlotCountPolicy::GroupMaximum);
}
