//! Error types for timeline-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    /// A time encoding could not be read (bad separator, non-numeric or
    /// out-of-range component).
    #[error("Invalid time '{input}': {message}")]
    Parse { input: String, message: String },

    /// An entry whose end does not come after its start.
    #[error("Invalid duration: start {start_min} is not before end {end_min}")]
    InvalidDuration { start_min: i64, end_min: i64 },

    #[error("Invalid reference hour: {0} (expected 0-23)")]
    InvalidReferenceHour(u32),

    /// One element of a record batch does not have the record shape.
    #[error("Malformed schedule record: {0}")]
    MalformedRecord(String),

    /// The batch itself is not a JSON array.
    #[error("Invalid schedule batch: {0}")]
    InvalidBatch(String),
}

impl TimelineError {
    pub(crate) fn parse(input: &str, message: impl Into<String>) -> Self {
        TimelineError::Parse {
            input: input.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TimelineError>;
