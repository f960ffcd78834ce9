//! Archive listing parser
//!
//! Parses the `identifier<TAB>YYYY-MM-DD HH:MM:SS` lines printed by
//! `tarsnap --list-archives -v`. A single bad line fails the whole listing:
//! an archive silently dropped from the listing would not be kept by any
//! rule, and a partial snapshot must never reach the deleter.

use crate::error::{SnapkeepError, SnapkeepResult};
use crate::models::{parse_timestamp, Backup};

/// Parse one listing line (1-based `line_num` is used for error reporting)
pub fn parse_archive_line(line: &str, line_num: usize) -> SnapkeepResult<Backup> {
    let line = line.trim_end();

    let (identifier, timestamp) = line.rsplit_once('\t').ok_or_else(|| {
        SnapkeepError::parse(line_num, format!("expected '<name>\\t<timestamp>', got {:?}", line))
    })?;

    if identifier.is_empty() {
        return Err(SnapkeepError::parse(
            line_num,
            format!("missing archive name in {:?}", line),
        ));
    }

    let timestamp = parse_timestamp(timestamp).ok_or_else(|| {
        SnapkeepError::parse(line_num, format!("invalid timestamp {:?}", timestamp))
    })?;

    Ok(Backup::new(timestamp, identifier))
}

/// Parse a full listing, returning the backups sorted chronologically
///
/// Blank lines are ignored.
pub fn parse_listing(text: &str) -> SnapkeepResult<Vec<Backup>> {
    let mut backups = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_archive_line(line, i + 1))
        .collect::<SnapkeepResult<Vec<_>>>()?;

    backups.sort();
    Ok(backups)
}
