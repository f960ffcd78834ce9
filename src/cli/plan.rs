//! Plan and policy CLI commands
//!
//! Read-only commands: show what a prune would do, and show the rules.

use clap::Args;

use super::SourceArgs;
use crate::config::settings::Settings;
use crate::display::{format_plan, format_policy};
use crate::error::SnapkeepResult;
use crate::services::PruneService;

/// Arguments for `snapkeep plan`
#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only show archives that would be deleted
    #[arg(long)]
    pub stale_only: bool,
}

/// Arguments for `snapkeep policy`
#[derive(Args, Debug, Clone)]
pub struct PolicyArgs {
    /// Reference time (YYYY-MM-DD HH:MM:SS, local); defaults to now
    #[arg(long, value_name = "TIMESTAMP", env = "SNAPKEEP_NOW")]
    pub now: Option<String>,
}

/// Handle `snapkeep plan`
pub fn handle_plan_command(settings: &Settings, args: PlanArgs) -> SnapkeepResult<()> {
    let now = args.source.reference_time()?;
    let policy = settings.policy(now)?;
    let archiver = args.source.archiver(settings);

    let plan = PruneService::new(archiver.as_ref()).plan(&policy)?;

    println!("Retention plan as of {}", now.format("%Y-%m-%d %H:%M:%S"));
    println!();
    print!("{}", format_plan(&plan, args.stale_only));
    if plan.is_empty() {
        println!();
    }

    Ok(())
}

/// Handle `snapkeep policy`
pub fn handle_policy_command(settings: &Settings, args: PolicyArgs) -> SnapkeepResult<()> {
    let source = SourceArgs {
        listing: None,
        now: args.now,
    };
    let now = source.reference_time()?;
    let policy = settings.policy(now)?;

    print!("{}", format_policy(&policy));

    Ok(())
}
