//! WASM bindings for timeline-engine.
//!
//! Exposes the render pass, slot assignment, overlap detection, and free-gap
//! search to the browser presentation layer via `wasm-bindgen`. All complex
//! types cross the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p timeline-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/timeline_engine_wasm.wasm
//! ```

use serde::Deserialize;
use timeline_engine::{
    assign_slots, build_timeline_decoded, decode_records, find_free_gaps, find_overlaps,
    DecodedRecord, LayoutConstants, MemberColumns, ScheduleEntry, SlotCountPolicy,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Input formats
// ---------------------------------------------------------------------------

/// Options for `layoutTimeline`. Every field may be omitted.
#[derive(Deserialize, Default)]
#[serde(default)]
struct LayoutOptions {
    /// Fixed member columns in order; empty means order of appearance.
    members: Vec<String>,
    layout: LayoutConstants,
    policy: SlotCountPolicy,
}

// ---------------------------------------------------------------------------
// JSON-level implementations (plain `String` errors, testable off-wasm)
// ---------------------------------------------------------------------------

fn parse<'a, T: Deserialize<'a>>(json: &'a str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn layout_timeline_json(records_json: &str, options_json: &str) -> Result<String, String> {
    let records: Vec<DecodedRecord> =
        decode_records(records_json).map_err(|e| format!("Invalid records JSON: {}", e))?;
    let options: LayoutOptions = if options_json.trim().is_empty() {
        LayoutOptions::default()
    } else {
        parse(options_json, "options")?
    };

    let columns = if options.members.is_empty() {
        MemberColumns::by_appearance()
    } else {
        MemberColumns::fixed(options.members)
    };

    let layout = build_timeline_decoded(&records, columns, &options.layout, options.policy)
        .map_err(|e| e.to_string())?;
    to_json(&layout)
}

fn assign_slots_json(entries_json: &str, policy: &str) -> Result<String, String> {
    let mut entries: Vec<ScheduleEntry> = parse(entries_json, "entries")?;
    for entry in &entries {
        entry.validate().map_err(|e| e.to_string())?;
    }
    let policy = parse_policy(policy)?;
    assign_slots(&mut entries, policy);
    to_json(&entries)
}

fn find_overlaps_json(entries_json: &str) -> Result<String, String> {
    let entries: Vec<ScheduleEntry> = parse(entries_json, "entries")?;
    to_json(&find_overlaps(&entries))
}

fn find_free_gaps_json(entries_json: &str, window_start: i64, window_end: i64) -> Result<String, String> {
    let entries: Vec<ScheduleEntry> = parse(entries_json, "entries")?;
    to_json(&find_free_gaps(&entries, window_start, window_end))
}

/// An empty string selects the default policy.
fn parse_policy(policy: &str) -> Result<SlotCountPolicy, String> {
    match policy {
        "" => Ok(SlotCountPolicy::default()),
        "group-maximum" => Ok(SlotCountPolicy::GroupMaximum),
        "active-snapshot" => Ok(SlotCountPolicy::ActiveSnapshot),
        other => Err(format!(
            "Unknown slot count policy: '{}'. Expected group-maximum or active-snapshot",
            other
        )),
    }
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Run a full render pass over raw schedule records.
///
/// `records_json` is an array of `{owner, start, end, flag}` records, where
/// `start`/`end` are `"HH:MM"` strings or `{hour, minute}` objects.
/// `options_json` may set `members`, `layout` and `policy`; pass `""` for defaults.
/// Returns the timeline layout as JSON.
#[wasm_bindgen(js_name = "layoutTimeline")]
pub fn layout_timeline(records_json: &str, options_json: &str) -> Result<String, JsValue> {
    layout_timeline_json(records_json, options_json).map_err(|e| JsValue::from_str(&e))
}

/// Assign slot indices and counts to already-normalized entries.
///
/// `entries_json` is an array of `{owner, start_min, end_min, flag}` objects.
/// Returns the same entries, annotated, in input order.
#[wasm_bindgen(js_name = "assignSlots")]
pub fn assign_slots_js(entries_json: &str, policy: &str) -> Result<String, JsValue> {
    assign_slots_json(entries_json, policy).map_err(|e| JsValue::from_str(&e))
}

/// Find same-owner overlapping entry pairs.
#[wasm_bindgen(js_name = "findOverlaps")]
pub fn find_overlaps_js(entries_json: &str) -> Result<String, JsValue> {
    find_overlaps_json(entries_json).map_err(|e| JsValue::from_str(&e))
}

/// Find free gaps within `[window_start, window_end)` canonical minutes.
#[wasm_bindgen(js_name = "findFreeGaps")]
pub fn find_free_gaps_js(entries_json: &str, window_start: i32, window_end: i32) -> Result<String, JsValue> {
    find_free_gaps_json(entries_json, i64::from(window_start), i64::from(window_end))
        .map_err(|e| JsValue::from_str(&e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const RECORDS: &str = r#"[
        {"owner": "u1", "start": "09:00", "end": "10:00"},
        {"owner": "u1", "start": "09:30", "end": "10:30"},
        {"owner": "u2", "start": {"hour": "10", "minute": "00"}, "end": {"hour": "11", "minute": "00"}}
    ]"#;

    #[test]
    fn layout_with_default_options() {
        let out: Value = serde_json::from_str(&layout_timeline_json(RECORDS, "").unwrap()).unwrap();
        assert_eq!(out["placed"].as_array().unwrap().len(), 3);
        assert_eq!(out["columns"], serde_json::json!(["u1", "u2"]));
        assert_eq!(out["placed"][1]["slot_index"], 1);
    }

    #[test]
    fn layout_options_are_applied() {
        let options = r#"{"members": ["u2"], "layout": {"start_hour": 10}, "policy": "active-snapshot"}"#;
        let out: Value =
            serde_json::from_str(&layout_timeline_json(RECORDS, options).unwrap()).unwrap();
        assert_eq!(out["columns"], serde_json::json!(["u2"]));
        assert_eq!(out["placed"][0]["geometry"]["top"], 0.0);
        assert_eq!(out["skipped"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn wrong_shaped_record_does_not_sink_the_batch() {
        let records = r#"[
            {"owner": "u1", "start": "09:00", "end": "10:00"},
            {"owner": "u1", "start": {"hour": 9, "minute": 0}, "end": "10:00"}
        ]"#;
        let out: Value = serde_json::from_str(&layout_timeline_json(records, "").unwrap()).unwrap();
        assert_eq!(out["placed"].as_array().unwrap().len(), 1);
        assert_eq!(out["skipped"][0]["record_index"], 1);
        assert_eq!(out["skipped"][0]["reason"], "unparseable");
    }

    #[test]
    fn assign_slots_three_way_overlap() {
        let entries = r#"[
            {"owner": "u1", "start_min": 540, "end_min": 600},
            {"owner": "u1", "start_min": 570, "end_min": 630},
            {"owner": "u1", "start_min": 580, "end_min": 590}
        ]"#;
        let out: Value = serde_json::from_str(&assign_slots_json(entries, "").unwrap()).unwrap();
        let slots: Vec<u64> = out
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["slot_index"].as_u64().unwrap())
            .collect();
        assert_eq!(slots, vec![0, 1, 2]);
        assert_eq!(out[0]["slot_count"], 3);
    }

    #[test]
    fn assign_slots_rejects_zero_duration() {
        let entries = r#"[{"owner": "u1", "start_min": 600, "end_min": 600}]"#;
        let err = assign_slots_json(entries, "").unwrap_err();
        assert!(err.contains("Invalid duration"), "{}", err);
    }

    #[test]
    fn unknown_policy_is_an_error() {
        assert!(assign_slots_json("[]", "widest").is_err());
    }

    #[test]
    fn overlaps_and_gaps() {
        let entries = r#"[
            {"owner": "u1", "start_min": 540, "end_min": 600},
            {"owner": "u1", "start_min": 570, "end_min": 630}
        ]"#;
        let overlaps: Value = serde_json::from_str(&find_overlaps_json(entries).unwrap()).unwrap();
        assert_eq!(overlaps[0]["overlap_minutes"], 30);

        let gaps: Value =
            serde_json::from_str(&find_free_gaps_json(entries, 480, 720).unwrap()).unwrap();
        assert_eq!(gaps.as_array().unwrap().len(), 2);
        assert_eq!(gaps[1]["start_min"], 630);
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = layout_timeline_json("{", "").unwrap_err();
        assert!(err.starts_with("Invalid records JSON"), "{}", err);
    }
}
