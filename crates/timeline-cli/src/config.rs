//! Layout configuration: a TOML file plus command-line overrides.
//!
//! ```toml
//! # layout.toml
//! member_column_width = 140.0
//! px_per_minute = 1.5
//! padding = 3.0
//! start_hour = 7
//! visible_hours = 16
//! ```
//!
//! Every key is optional; missing keys take the engine defaults.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use timeline_engine::LayoutConstants;
use tracing::warn;

#[derive(Args, Default)]
pub struct LayoutArgs {
    /// TOML file with layout constants
    #[arg(long, value_name = "FILE")]
    pub layout: Option<String>,
    /// First hour on the grid; earlier times wrap to the next day
    #[arg(long)]
    pub start_hour: Option<u32>,
    /// Width of one member column in px
    #[arg(long)]
    pub column_width: Option<f64>,
    /// Vertical px per minute
    #[arg(long)]
    pub px_per_minute: Option<f64>,
}

impl LayoutArgs {
    /// Load the layout file (if any), apply overrides, and report degenerate settings.
    pub fn resolve(&self) -> Result<LayoutConstants> {
        let mut constants = match self.layout.as_deref() {
            Some(path) => load_layout(Path::new(path))?,
            None => LayoutConstants::default(),
        };

        if let Some(hour) = self.start_hour {
            constants.start_hour = hour;
        }
        if let Some(width) = self.column_width {
            constants.member_column_width = width;
        }
        if let Some(px) = self.px_per_minute {
            constants.px_per_minute = px;
        }

        for issue in constants.issues() {
            warn!(%issue, "degenerate layout setting");
        }

        Ok(constants)
    }
}

pub fn load_layout(path: &Path) -> Result<LayoutConstants> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout file: {}", path.display()))?;
    parse_layout(&contents).with_context(|| format!("Invalid layout file: {}", path.display()))
}

fn parse_layout(contents: &str) -> Result<LayoutConstants> {
    Ok(toml::from_str(contents)?)
}
