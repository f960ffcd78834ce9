//! Audit CLI command

use clap::Args;

use crate::audit::AuditLogger;
use crate::config::paths::SnapkeepPaths;
use crate::error::SnapkeepResult;

/// Arguments for `snapkeep audit`
#[derive(Args, Debug, Clone)]
pub struct AuditArgs {
    /// Number of most recent entries to show
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,
}

/// Handle `snapkeep audit`
pub fn handle_audit_command(paths: &SnapkeepPaths, args: AuditArgs) -> SnapkeepResult<()> {
    let logger = AuditLogger::new(paths.audit_log());
    let entries = logger.read_recent(args.limit)?;

    if entries.is_empty() {
        println!("No audit entries.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
