//! Data models for storage

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::analysis::Sentiment;

/// Timestamp layout used in the log, local time without offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column order of every row in the log.
pub const HEADER: [&str; 4] = ["Timestamp", "Transcript", "Summary", "Sentiment"];

/// One analyzed transcript as stored in the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Local time the record was written
    pub timestamp: NaiveDateTime,

    /// Submitted transcript, kept on a single line
    pub transcript: String,

    /// Model-produced summary
    pub summary: String,

    /// Sentiment label
    pub sentiment: Sentiment,
}

impl LogRecord {
    /// Create a record stamped with the current local time.
    ///
    /// Line breaks in the transcript become spaces so the row stays on one line.
    pub fn new(transcript: &str, summary: String, sentiment: Sentiment) -> Self {
        Self {
            timestamp: now_local(),
            transcript: single_line(transcript),
            summary,
            sentiment,
        }
    }

    /// Timestamp rendered in the log's format
    pub fn timestamp_string(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Current local time truncated to whole seconds
fn now_local() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Replace `\n` with a space and drop `\r`.
fn single_line(text: &str) -> String {
    text.replace('\n', " ").replace('\r', "")
}
