//! Archive collaborators
//!
//! An [`Archiver`] knows how to enumerate the backups that currently exist
//! and how to delete a batch of them. The retention engine never talks to
//! storage directly; it only classifies what an archiver lists.
//!
//! - `Tarsnap`: drives the `tarsnap` command-line client
//! - `ListingFile`: reads a saved `--list-archives -v` listing (planning only)

mod listing;
mod tarsnap;

use std::path::PathBuf;

use crate::error::{SnapkeepError, SnapkeepResult};
use crate::models::Backup;

pub use listing::{parse_archive_line, parse_listing};
pub use tarsnap::{display_command, Tarsnap};

/// Source of backups and sink for deletions
pub trait Archiver {
    /// Name used in logs and messages
    fn name(&self) -> &str;

    /// Every backup that currently exists
    ///
    /// Implementations must return either a complete listing or an error,
    /// never a partial one.
    fn list_backups(&self) -> SnapkeepResult<Vec<Backup>>;

    /// Delete `stale` in a single batch
    fn delete(&self, stale: &[Backup]) -> SnapkeepResult<()>;
}

/// A listing saved to disk, e.g. `tarsnap --list-archives -v > archives.txt`
#[derive(Debug, Clone)]
pub struct ListingFile {
    path: PathBuf,
    label: String,
}

impl ListingFile {
    pub fn new(path: PathBuf) -> Self {
        let label = path.display().to_string();
        Self { path, label }
    }
}

impl Archiver for ListingFile {
    fn name(&self) -> &str {
        &self.label
    }

    fn list_backups(&self) -> SnapkeepResult<Vec<Backup>> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            SnapkeepError::Io(format!("Failed to read listing {}: {}", self.label, e))
        })?;
        parse_listing(&text)
    }

    fn delete(&self, stale: &[Backup]) -> SnapkeepResult<()> {
        if stale.is_empty() {
            return Ok(());
        }
        tracing::warn!(listing = %self.label, count = stale.len(), "refusing to delete from a listing file");
        Err(SnapkeepError::Config(format!(
            "Cannot delete archives listed in {}; use --dry-run or run against the archiver",
            self.label
        )))
    }
}
