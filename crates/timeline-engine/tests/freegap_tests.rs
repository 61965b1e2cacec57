//! Tests for free-gap computation.

use timeline_engine::{find_free_gaps, FreeGap, ScheduleEntry};

fn entry(owner: &str, start: i64, end: i64) -> ScheduleEntry {
    ScheduleEntry::new(owner.to_string(), start, end, "").unwrap()
}

fn gap(start_min: i64, end_min: i64) -> FreeGap {
    FreeGap {
        start_min,
        end_min,
        duration_minutes: end_min - start_min,
    }
}

#[test]
fn single_entry_produces_two_gaps() {
    // Window 08:00-17:00, busy 10:00-11:00
    let entries = vec![entry("u1", 600, 660)];
    let gaps = find_free_gaps(&entries, 480, 1020);
    assert_eq!(gaps, vec![gap(480, 600), gap(660, 1020)]);
    assert_eq!(gaps[0].duration_minutes, 120);
}

#[test]
fn overlapping_entries_merged() {
    // 10:00-11:30 and 11:00-12:00 → busy 10:00-12:00
    let entries = vec![entry("u1", 600, 690), entry("u1", 660, 720)];
    let gaps = find_free_gaps(&entries, 480, 1020);
    assert_eq!(gaps, vec![gap(480, 600), gap(720, 1020)]);
}

#[test]
fn touching_entries_leave_no_gap_between() {
    let entries = vec![entry("u1", 600, 660), entry("u1", 660, 720)];
    let gaps = find_free_gaps(&entries, 600, 720);
    assert!(gaps.is_empty());
}

#[test]
fn team_gaps_merge_every_member() {
    let entries = vec![
        entry("alice", 540, 600),
        entry("bob", 570, 660),
        entry("carol", 720, 780),
    ];
    let gaps = find_free_gaps(&entries, 480, 840);
    assert_eq!(gaps, vec![gap(480, 540), gap(660, 720), gap(780, 840)]);
}

#[test]
fn entries_outside_window_are_clipped() {
    let entries = vec![entry("u1", 300, 500), entry("u1", 1000, 1200), entry("u1", 1300, 1400)];
    let gaps = find_free_gaps(&entries, 480, 1020);
    assert_eq!(gaps, vec![gap(500, 1000)]);
}

#[test]
fn no_entries_whole_window_free() {
    let entries: Vec<ScheduleEntry> = Vec::new();
    assert_eq!(find_free_gaps(&entries, 480, 1020), vec![gap(480, 1020)]);
}

#[test]
fn inverted_window_has_no_gaps() {
    let entries: Vec<ScheduleEntry> = Vec::new();
    assert!(find_free_gaps(&entries, 1020, 480).is_empty());
    assert!(find_free_gaps(&entries, 480, 480).is_empty());
}
