//! Prune service
//!
//! Ties the pieces together: list every archive, evaluate the policy,
//! delete the stale set in one batch, then record what was removed.

use crate::archive::Archiver;
use crate::audit::{AuditEntry, AuditLogger};
use crate::error::SnapkeepResult;
use crate::models::Backup;
use crate::retention::{Policy, RetentionPlan};

/// Result of a prune run
#[derive(Debug, Clone)]
pub struct PruneReport {
    /// Decisions for every listed archive
    pub plan: RetentionPlan,
    /// Archives removed (or that would be removed on a dry run), sorted
    pub deleted: Vec<Backup>,
    pub dry_run: bool,
    /// Why the audit log could not be written, if it could not
    pub audit_error: Option<String>,
}

/// Service for applying a retention policy to an archiver
pub struct PruneService<'a> {
    archiver: &'a dyn Archiver,
    audit: Option<AuditLogger>,
    audit_dry_runs: bool,
}

impl<'a> PruneService<'a> {
    /// Create a new prune service without auditing
    pub fn new(archiver: &'a dyn Archiver) -> Self {
        Self {
            archiver,
            audit: None,
            audit_dry_runs: false,
        }
    }

    /// Record deletions in `logger`; with `audit_dry_runs`, dry runs too
    pub fn with_audit(mut self, logger: AuditLogger, audit_dry_runs: bool) -> Self {
        self.audit = Some(logger);
        self.audit_dry_runs = audit_dry_runs;
        self
    }

    /// List archives and classify them under `policy`
    pub fn plan(&self, policy: &Policy) -> SnapkeepResult<RetentionPlan> {
        let backups = self.archiver.list_backups()?;
        let plan = policy.evaluate(&backups);
        tracing::info!(
            archiver = %self.archiver.name(),
            total = plan.len(),
            stale = plan.stale().len(),
            "evaluated retention policy"
        );
        Ok(plan)
    }

    /// Delete every archive `policy` does not keep
    ///
    /// The archiver receives the full stale set in one call. Nothing is
    /// audited unless that call succeeds. Once archives are gone, a failure
    /// to write the audit log is reported in the result, not as an error.
    pub fn prune(&self, policy: &Policy, dry_run: bool) -> SnapkeepResult<PruneReport> {
        let plan = self.plan(policy)?;
        let stale: Vec<Backup> = plan.stale().into_iter().collect();

        if stale.is_empty() {
            tracing::info!("nothing to delete");
        } else if dry_run {
            tracing::info!(count = stale.len(), "dry run; not deleting");
        } else {
            self.archiver.delete(&stale)?;
        }

        let audit_error = match self.record(policy, &stale, dry_run) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    count = stale.len(),
                    dry_run,
                    "archives processed but the audit log was not written"
                );
                Some(e.to_string())
            }
        };

        Ok(PruneReport {
            plan,
            deleted: stale,
            dry_run,
            audit_error,
        })
    }

    fn record(&self, policy: &Policy, stale: &[Backup], dry_run: bool) -> SnapkeepResult<()> {
        let logger = match &self.audit {
            Some(logger) if !dry_run || self.audit_dry_runs => logger,
            _ => return Ok(()),
        };

        let labels: Vec<String> = policy.rules().iter().map(|r| r.label()).collect();
        let entries: Vec<AuditEntry> = stale
            .iter()
            .map(|b| {
                if dry_run {
                    AuditEntry::would_delete(b, labels.clone())
                } else {
                    AuditEntry::deleted(b, labels.clone())
                }
            })
            .collect();

        logger.log_batch(&entries)
    }
}
