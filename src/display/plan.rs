//! Retention plan display formatting
//!
//! Renders a plan as a table of archives with their fate and the rules that
//! keep them.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::TIMESTAMP_FORMAT;
use crate::retention::{Decision, RetentionPlan};

#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "Taken")]
    taken: String,
    #[tabled(rename = "Archive")]
    archive: String,
    #[tabled(rename = "Action")]
    action: &'static str,
    #[tabled(rename = "Kept by")]
    kept_by: String,
}

impl From<&Decision> for PlanRow {
    fn from(decision: &Decision) -> Self {
        Self {
            taken: decision.backup.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            archive: decision.backup.identifier.clone(),
            action: if decision.is_kept() { "keep" } else { "delete" },
            kept_by: decision.kept_by.join(", "),
        }
    }
}

/// Format a plan as a table; with `stale_only`, only archives to delete
pub fn format_plan(plan: &RetentionPlan, stale_only: bool) -> String {
    if plan.is_empty() {
        return "No archives found.".to_string();
    }

    let rows: Vec<PlanRow> = plan
        .decisions()
        .iter()
        .filter(|d| !stale_only || !d.is_kept())
        .map(PlanRow::from)
        .collect();

    let mut output = String::new();
    if rows.is_empty() {
        output.push_str("Nothing to delete.\n");
    } else {
        let mut table = Table::new(rows);
        table.with(Style::psql());
        output.push_str(&table.to_string());
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format_plan_summary(plan));
    output
}

/// One-line count of kept and stale archives
pub fn format_plan_summary(plan: &RetentionPlan) -> String {
    let stale = plan.stale().len();
    format!(
        "Total: {} archive(s), {} kept, {} to delete\n",
        plan.len(),
        plan.len() - stale,
        stale
    )
}
