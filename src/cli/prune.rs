//! Prune CLI command
//!
//! Deletes every archive the configured policy does not keep.

use clap::Args;

use super::SourceArgs;
use crate::audit::AuditLogger;
use crate::config::paths::SnapkeepPaths;
use crate::config::settings::Settings;
use crate::display::format_plan_summary;
use crate::error::SnapkeepResult;
use crate::services::PruneService;

/// Arguments for `snapkeep prune`
#[derive(Args, Debug, Clone)]
pub struct PruneArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Show what would be deleted without deleting anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

/// Handle `snapkeep prune`
pub fn handle_prune_command(
    paths: &SnapkeepPaths,
    settings: &Settings,
    args: PruneArgs,
) -> SnapkeepResult<()> {
    let now = args.source.reference_time()?;
    let policy = settings.policy(now)?;
    let archiver = args.source.archiver(settings);

    let mut service = PruneService::new(archiver.as_ref());
    if settings.audit.enabled {
        service = service.with_audit(
            AuditLogger::new(paths.audit_log()),
            settings.audit.audit_dry_runs,
        );
    }

    let report = service.prune(&policy, args.dry_run)?;

    if report.deleted.is_empty() {
        println!("Nothing to delete.");
    } else if report.dry_run {
        println!("Would delete {} archive(s):", report.deleted.len());
        for backup in &report.deleted {
            println!("  {}", backup);
        }
    } else {
        println!("Deleted {} archive(s).", report.deleted.len());
    }
    print!("{}", format_plan_summary(&report.plan));
    if let Some(error) = &report.audit_error {
        println!("Warning: the audit log was not updated: {}", error);
    }

    Ok(())
}
