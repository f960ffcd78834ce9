//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod plan;
pub mod prune;

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::Args;

use crate::archive::{Archiver, ListingFile, Tarsnap};
use crate::config::settings::Settings;
use crate::error::{SnapkeepError, SnapkeepResult};
use crate::models::parse_timestamp;

pub use audit::{handle_audit_command, AuditArgs};
pub use plan::{handle_plan_command, handle_policy_command, PlanArgs, PolicyArgs};
pub use prune::{handle_prune_command, PruneArgs};

/// Where the archive list comes from, and the reference time to judge it by
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Read a saved `--list-archives -v` listing instead of running the archiver
    #[arg(long, value_name = "FILE")]
    pub listing: Option<PathBuf>,

    /// Reference time (YYYY-MM-DD HH:MM:SS, local); defaults to now
    #[arg(long, value_name = "TIMESTAMP", env = "SNAPKEEP_NOW")]
    pub now: Option<String>,
}

impl SourceArgs {
    /// The reference time, fetched from the wall clock when not given
    pub fn reference_time(&self) -> SnapkeepResult<NaiveDateTime> {
        match &self.now {
            Some(value) => parse_timestamp(value.trim()).ok_or_else(|| {
                SnapkeepError::Config(format!(
                    "Invalid --now value {:?}: expected YYYY-MM-DD HH:MM:SS",
                    value
                ))
            }),
            None => Ok(chrono::Local::now().naive_local()),
        }
    }

    /// The archiver to list from (and delete through)
    pub fn archiver(&self, settings: &Settings) -> Box<dyn Archiver> {
        match &self.listing {
            Some(path) => Box::new(ListingFile::new(path.clone())),
            None => Box::new(Tarsnap::from_settings(&settings.archiver)),
        }
    }
}
