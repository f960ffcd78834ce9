//! Audit logger for the append-only prune history
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use crate::error::{SnapkeepError, SnapkeepResult};

use super::entry::AuditEntry;

/// Handles writing audit entries to the audit log file (JSONL)
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new AuditLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one prune run's entries as a single write
    pub fn log_batch(&self, entries: &[AuditEntry]) -> SnapkeepResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut batch = String::new();
        for entry in entries {
            batch.push_str(&serde_json::to_string(entry)?);
            batch.push('\n');
        }

        let io_error = |action: &str, e: std::io::Error| {
            SnapkeepError::Io(format!(
                "Cannot {} audit log {}: {}",
                action,
                self.log_path.display(),
                e
            ))
        };

        if let Some(parent) = self.log_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| io_error("create directory for", e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| io_error("open", e))?;
        file.write_all(batch.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| io_error("write", e))
    }

    /// Every recorded deletion, oldest first
    ///
    /// A missing log means nothing has been pruned yet. A line that is not
    /// an audit entry fails the read with `path:line` in the message.
    pub fn read_all(&self) -> SnapkeepResult<Vec<AuditEntry>> {
        let contents = match std::fs::read_to_string(&self.log_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(SnapkeepError::Io(format!(
                    "Cannot read audit log {}: {}",
                    self.log_path.display(),
                    e
                )))
            }
        };

        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line).map_err(|e| {
                    SnapkeepError::Json(format!(
                        "{}:{}: not an audit entry: {}",
                        self.log_path.display(),
                        index + 1,
                        e
                    ))
                })
            })
            .collect()
    }

    /// The last `count` deletions, oldest first
    pub fn read_recent(&self, count: usize) -> SnapkeepResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let skip = entries.len().saturating_sub(count);
        Ok(entries.split_off(skip))
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}
