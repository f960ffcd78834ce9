//! Policy composition
//!
//! A policy is an ordered list of rules. A backup is kept if any rule keeps
//! it; everything else is stale.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDateTime, TimeDelta};

use super::bin::BinShape;
use super::rule::Rule;
use crate::error::SnapkeepResult;
use crate::models::Backup;

/// An ordered set of retention rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    rules: Vec<Rule>,
}

impl Policy {
    /// Create a policy from a list of rules
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The stock grandfather-father-son policy anchored at `now`
    ///
    /// - everything from the last day
    /// - one per day for 3 days
    /// - one per week (Saturday) for 32 days
    /// - one per month for a year
    /// - one per year for 5 years
    pub fn default_at(now: NaiveDateTime) -> SnapkeepResult<Self> {
        Ok(Self::new(vec![
            Rule::keep_all(TimeDelta::days(1), now)?,
            Rule::binned(BinShape::Daily, TimeDelta::days(3), now)?,
            Rule::binned(BinShape::weekly(), TimeDelta::days(32), now)?,
            Rule::binned(BinShape::Monthly, TimeDelta::days(365), now)?,
            Rule::binned(BinShape::Yearly, TimeDelta::days(5 * 365), now)?,
        ]))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Union of every rule's keep-set
    pub fn keepers(&self, backups: &[Backup]) -> BTreeSet<Backup> {
        self.rules
            .iter()
            .flat_map(|rule| rule.keepers(backups))
            .collect()
    }

    /// Classify every backup, remembering which rules kept it
    pub fn evaluate(&self, backups: &[Backup]) -> RetentionPlan {
        let mut kept_by: BTreeMap<Backup, Vec<String>> = backups
            .iter()
            .map(|b| (b.clone(), Vec::new()))
            .collect();

        for rule in &self.rules {
            let label = rule.label();
            for backup in rule.keepers(backups) {
                if let Some(labels) = kept_by.get_mut(&backup) {
                    labels.push(label.clone());
                }
            }
        }

        let decisions = kept_by
            .into_iter()
            .map(|(backup, kept_by)| Decision { backup, kept_by })
            .collect();

        RetentionPlan { decisions }
    }
}

/// The backups a policy would delete: `all - policy.keepers(all)`
pub fn compute_stale(all: &[Backup], policy: &Policy) -> BTreeSet<Backup> {
    let keep = policy.keepers(all);
    all.iter().filter(|b| !keep.contains(b)).cloned().collect()
}

/// Outcome for a single backup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub backup: Backup,
    /// Labels of the rules that keep this backup, in policy order
    pub kept_by: Vec<String>,
}

impl Decision {
    pub fn is_kept(&self) -> bool {
        !self.kept_by.is_empty()
    }
}

/// Per-backup retention decisions, sorted chronologically
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetentionPlan {
    decisions: Vec<Decision>,
}

impl RetentionPlan {
    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    /// Backups kept by at least one rule
    pub fn kept(&self) -> BTreeSet<Backup> {
        self.decisions
            .iter()
            .filter(|d| d.is_kept())
            .map(|d| d.backup.clone())
            .collect()
    }

    /// Backups no rule keeps
    pub fn stale(&self) -> BTreeSet<Backup> {
        self.decisions
            .iter()
            .filter(|d| !d.is_kept())
            .map(|d| d.backup.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    fn now() -> NaiveDateTime {
        dt(2014, 7, 4, 12, 43)
    }

    fn daily_backups() -> Vec<Backup> {
        let mut backups = Vec::new();
        let mut t = dt(2012, 6, 1, 8, 0);
        while t < now() {
            backups.push(Backup::new(t, t.format("%Y-%m-%dT%H:%M:%S").to_string()));
            t += TimeDelta::days(1);
        }
        backups
    }

    #[test]
    fn test_default_policy_shape() {
        let policy = Policy::default_at(now()).unwrap();
        let labels: Vec<String> = policy.rules().iter().map(Rule::label).collect();
        assert_eq!(
            labels,
            vec!["all<1d", "daily<3d", "weekly(Sat)<32d", "monthly<1y", "yearly<5y"]
        );
    }

    #[test]
    fn test_keepers_is_union() {
        let backups = daily_backups();
        let daily = Rule::binned(BinShape::Daily, TimeDelta::days(3), now()).unwrap();
        let monthly = Rule::binned(BinShape::Monthly, TimeDelta::days(93), now()).unwrap();
        let policy = Policy::new(vec![daily.clone(), monthly.clone()]);

        let mut expected = daily.keepers(&backups);
        expected.extend(monthly.keepers(&backups));
        assert_eq!(policy.keepers(&backups), expected);
        // 05-01, 06-01, 07-01 and 07-02, 07-03, 07-04
        assert_eq!(expected.len(), 6);
    }

    #[test]
    fn test_rule_order_does_not_matter() {
        let backups = daily_backups();
        let mut rules = Policy::default_at(now()).unwrap().rules().to_vec();
        let forward = Policy::new(rules.clone()).keepers(&backups);
        rules.reverse();
        assert_eq!(Policy::new(rules).keepers(&backups), forward);
    }

    #[test]
    fn test_compute_stale_keeps_newest_only() {
        let oldest = Backup::new(dt(2004, 7, 4, 8, 0), "ancient");
        let newest = Backup::new(dt(2014, 7, 4, 11, 0), "fresh");
        let policy = Policy::default_at(now()).unwrap();

        let stale = compute_stale(&[oldest.clone(), newest], &policy);
        assert_eq!(stale.into_iter().collect::<Vec<_>>(), vec![oldest]);
    }

    #[test]
    fn test_stale_and_kept_partition_input() {
        let backups = daily_backups();
        let policy = Policy::default_at(now()).unwrap();

        let keep = policy.keepers(&backups);
        let stale = compute_stale(&backups, &policy);
        assert!(keep.is_disjoint(&stale));
        assert_eq!(keep.len() + stale.len(), backups.len());
    }

    #[test]
    fn test_empty_policy_keeps_nothing() {
        let backups = daily_backups();
        let policy = Policy::new(Vec::new());
        assert!(policy.is_empty());
        assert_eq!(compute_stale(&backups, &policy).len(), backups.len());
    }

    #[test]
    fn test_evaluate_records_rule_labels() {
        let backups = daily_backups();
        let policy = Policy::default_at(now()).unwrap();
        let plan = policy.evaluate(&backups);

        assert_eq!(plan.len(), backups.len());
        assert_eq!(plan.kept(), policy.keepers(&backups));
        assert_eq!(plan.stale(), compute_stale(&backups, &policy));

        let latest = plan.decisions().last().unwrap();
        assert_eq!(latest.backup.identifier, "2014-07-04T08:00:00");
        assert_eq!(
            latest.kept_by,
            vec!["all<1d", "daily<3d", "weekly(Sat)<32d", "yearly<5y"]
        );
    }
}
