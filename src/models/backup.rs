//! Backup record
//!
//! A single archived snapshot, identified by its archive name and the time
//! it was taken.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format used in listings and on the command line
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One point-in-time backup
///
/// Ordering is by timestamp first, then identifier, so sorting a collection
/// of backups is chronological with a deterministic tie-break.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Backup {
    /// When the backup was taken
    pub timestamp: NaiveDateTime,
    /// Opaque archive identifier
    pub identifier: String,
}

impl Backup {
    /// Create a new backup record
    pub fn new(timestamp: NaiveDateTime, identifier: impl Into<String>) -> Self {
        Self {
            timestamp,
            identifier: identifier.into(),
        }
    }
}

impl fmt::Display for Backup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.identifier,
            self.timestamp.format(TIMESTAMP_FORMAT)
        )
    }
}

/// Parse a `YYYY-MM-DD[ T]HH:MM:SS` timestamp
///
/// The layout is checked byte by byte so that loosely formatted values
/// (single-digit months, missing seconds) are rejected rather than guessed.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let bytes = s.as_bytes();
    if bytes.len() != 19 {
        return None;
    }

    for (i, b) in bytes.iter().enumerate() {
        let ok = match i {
            4 | 7 => *b == b'-',
            10 => *b == b' ' || *b == b'T',
            13 | 16 => *b == b':',
            _ => b.is_ascii_digit(),
        };
        if !ok {
            return None;
        }
    }

    let normalized = format!("{} {}", &s[..10], &s[11..]);
    NaiveDateTime::parse_from_str(&normalized, TIMESTAMP_FORMAT).ok()
}
