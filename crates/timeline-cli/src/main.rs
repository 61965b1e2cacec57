//! `timeline` CLI -- lay out, check, and search team schedules from the command line.
//!
//! Input is a JSON array of schedule records:
//!
//! ```json
//! [
//!   {"owner": "alice", "start": "09:00", "end": "10:30", "flag": "meeting"},
//!   {"owner": "bob", "start": {"hour": "13", "minute": "00"}, "end": {"hour": "14", "minute": ""}}
//! ]
//! ```
//!
//! ## Usage
//!
//! ```sh
//! # Full render pass: slots + pixel geometry as JSON (stdin → stdout)
//! cat schedule.json | timeline layout
//!
//! # Fixed member columns and a layout file
//! timeline layout -i schedule.json --members alice,bob,carol --layout layout.toml
//!
//! # Double bookings per member
//! timeline overlaps -i schedule.json
//!
//! # Free time for one member, at least 30 minutes long
//! timeline free -i schedule.json --owner alice --min-duration 30
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` or pass `-v` for more detail.

mod config;

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use timeline_engine::{
    build_timeline_decoded, decode_records, entries_from_decoded, find_free_gaps, find_overlaps,
    format_clock, DecodedRecord, MemberColumns, ScheduleEntry, SlotCountPolicy,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::LayoutArgs;

#[derive(Parser)]
#[command(
    name = "timeline",
    version,
    about = "Team schedule timeline layout CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log engine decisions (skipped records, slot counts) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct IoArgs {
    /// Input JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Every block of a member shares the member's widest overlap
    GroupMax,
    /// Each block keeps the overlap count seen while it was open
    Snapshot,
}

impl From<PolicyArg> for SlotCountPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::GroupMax => SlotCountPolicy::GroupMaximum,
            PolicyArg::Snapshot => SlotCountPolicy::ActiveSnapshot,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Assign slots and compute pixel geometry for every record
    Layout {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        layout: LayoutArgs,
        /// Comma-separated member ids, one column each, in order.
        /// Records for other owners are skipped. Defaults to order of appearance.
        #[arg(long)]
        members: Option<String>,
        /// How slot counts are stamped onto a member's blocks
        #[arg(long, value_enum, default_value = "group-max")]
        policy: PolicyArg,
    },
    /// List overlapping blocks within each member's schedule
    Overlaps {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// List free time inside the visible window
    Free {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        layout: LayoutArgs,
        /// Only this member's schedule (whole team if omitted)
        #[arg(long)]
        owner: Option<String>,
        /// Minimum gap length in minutes
        #[arg(long, default_value_t = 0)]
        min_duration: i64,
    },
}

#[derive(Serialize)]
struct OverlapDto {
    owner: String,
    first: BlockDto,
    second: BlockDto,
    overlap_minutes: i64,
}

#[derive(Serialize)]
struct BlockDto {
    start: String,
    end: String,
    flag: String,
}

impl From<&ScheduleEntry> for BlockDto {
    fn from(e: &ScheduleEntry) -> Self {
        Self {
            start: format_clock(e.start_min),
            end: format_clock(e.end_min),
            flag: e.flag.clone(),
        }
    }
}

#[derive(Serialize)]
struct FreeGapDto {
    start: String,
    end: String,
    start_min: i64,
    end_min: i64,
    duration_minutes: i64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match cli.command {
        Commands::Layout {
            io,
            layout,
            members,
            policy,
        } => {
            let constants = layout.resolve()?;
            let records = read_records(io.input.as_deref())?;
            let columns = build_columns(members.as_deref());

            let result = build_timeline_decoded(&records, columns, &constants, policy.into())
                .context("Failed to lay out timeline")?;
            info!(
                placed = result.placed.len(),
                skipped = result.skipped.len(),
                "layout complete"
            );

            write_json(io.output.as_deref(), &result)?;
        }
        Commands::Overlaps { io, layout } => {
            let constants = layout.resolve()?;
            let records = read_records(io.input.as_deref())?;
            let wrap = constants.day_wrap().context("Invalid start hour")?;

            let (entries, _skipped) = entries_from_decoded(&records, wrap);
            let entries: Vec<ScheduleEntry> = entries.into_iter().map(|(_, e)| e).collect();

            let dtos: Vec<OverlapDto> = find_overlaps(&entries)
                .iter()
                .map(|o| OverlapDto {
                    owner: o.entry_a.owner.clone(),
                    first: BlockDto::from(&o.entry_a),
                    second: BlockDto::from(&o.entry_b),
                    overlap_minutes: o.overlap_minutes,
                })
                .collect();

            write_json(io.output.as_deref(), &dtos)?;
        }
        Commands::Free {
            io,
            layout,
            owner,
            min_duration,
        } => {
            let constants = layout.resolve()?;
            let records = read_records(io.input.as_deref())?;
            let wrap = constants.day_wrap().context("Invalid start hour")?;

            let (entries, _skipped) = entries_from_decoded(&records, wrap);
            let entries: Vec<ScheduleEntry> = entries
                .into_iter()
                .map(|(_, e)| e)
                .filter(|e| owner.as_ref().is_none_or(|o| &e.owner == o))
                .collect();
            debug!(entries = entries.len(), ?owner, "computing free gaps");

            let (window_start, window_end) = constants.visible_window();
            let dtos: Vec<FreeGapDto> = find_free_gaps(&entries, window_start, window_end)
                .into_iter()
                .filter(|gap| gap.duration_minutes >= min_duration)
                .map(|gap| FreeGapDto {
                    start: format_clock(gap.start_min),
                    end: format_clock(gap.end_min),
                    start_min: gap.start_min,
                    end_min: gap.end_min,
                    duration_minutes: gap.duration_minutes,
                })
                .collect();

            write_json(io.output.as_deref(), &dtos)?;
        }
    }

    Ok(())
}

/// Fixed columns from `--members a,b,c`, or columns by first appearance.
///
/// An empty `--members` string is treated as absent.
fn build_columns(members: Option<&str>) -> MemberColumns {
    let ids: Vec<String> = members
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if ids.is_empty() {
        MemberColumns::by_appearance()
    } else {
        MemberColumns::fixed(ids)
    }
}

/// Records that do not have the record shape are kept as decode errors, so
/// they are skipped by index rather than failing the whole batch.
fn read_records(path: Option<&str>) -> Result<Vec<DecodedRecord>> {
    let json = read_input(path)?;
    decode_records(&json).context("Failed to parse schedule records JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_json<T: Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => {
            std::fs::write(path, pretty).with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", pretty);
        }
    }
    Ok(())
}
