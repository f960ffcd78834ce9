//! Retention rules
//!
//! A rule looks back `duration` from its reference time and picks the
//! backups it wants to keep. Window rules keep everything in range; binned
//! rules keep one backup per calendar bin.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{NaiveDateTime, TimeDelta};

use super::bin::BinShape;
use super::span::format_span;
use crate::error::{SnapkeepError, SnapkeepResult};
use crate::models::Backup;

/// What a rule does with the backups inside its window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Keep every backup in the window
    KeepAll,
    /// Keep at most one backup per bin in the window
    Binned(BinShape),
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::KeepAll => write!(f, "all"),
            RuleKind::Binned(shape) => write!(f, "{}", shape),
        }
    }
}

/// A single retention rule anchored at a reference time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    kind: RuleKind,
    duration: TimeDelta,
    reference_time: NaiveDateTime,
    min_time: NaiveDateTime,
}

impl Rule {
    /// Create a rule looking back `duration` from `reference_time`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `duration` is negative.
    pub fn new(
        kind: RuleKind,
        duration: TimeDelta,
        reference_time: NaiveDateTime,
    ) -> SnapkeepResult<Self> {
        if duration < TimeDelta::zero() {
            return Err(SnapkeepError::Config(format!(
                "Rule '{}' has a negative duration ({}s)",
                kind,
                duration.num_seconds()
            )));
        }

        let min_time = reference_time
            .checked_sub_signed(duration)
            .unwrap_or(NaiveDateTime::MIN);

        Ok(Self {
            kind,
            duration,
            reference_time,
            min_time,
        })
    }

    /// Keep every backup newer than `duration`
    pub fn keep_all(duration: TimeDelta, reference_time: NaiveDateTime) -> SnapkeepResult<Self> {
        Self::new(RuleKind::KeepAll, duration, reference_time)
    }

    /// Keep one backup per `shape` bin within `duration`
    pub fn binned(
        shape: BinShape,
        duration: TimeDelta,
        reference_time: NaiveDateTime,
    ) -> SnapkeepResult<Self> {
        Self::new(RuleKind::Binned(shape), duration, reference_time)
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn duration(&self) -> TimeDelta {
        self.duration
    }

    pub fn reference_time(&self) -> NaiveDateTime {
        self.reference_time
    }

    /// Oldest instant this rule considers (inclusive)
    pub fn min_time(&self) -> NaiveDateTime {
        self.min_time
    }

    /// Short human label, e.g. `weekly(Sat)<32d`
    pub fn label(&self) -> String {
        format!("{}<{}", self.kind, format_span(self.duration))
    }

    /// The backups this rule wants to keep
    pub fn keepers(&self, backups: &[Backup]) -> BTreeSet<Backup> {
        let kept = match self.kind {
            RuleKind::KeepAll => self.window_keepers(backups),
            RuleKind::Binned(shape) => self.binned_keepers(shape, backups),
        };
        tracing::debug!(rule = %self.label(), kept = kept.len(), "evaluated rule");
        kept
    }

    fn window_keepers(&self, backups: &[Backup]) -> BTreeSet<Backup> {
        backups
            .iter()
            .filter(|b| b.timestamp >= self.min_time)
            .cloned()
            .collect()
    }

    /// One survivor per nearest bin boundary at or after `min_time`
    ///
    /// Each backup is filed under whichever edge of its own bin it sits
    /// closest to; within an edge the smallest distance wins, then the
    /// smaller backup.
    fn binned_keepers(&self, shape: BinShape, backups: &[Backup]) -> BTreeSet<Backup> {
        let mut by_bin: BTreeMap<NaiveDateTime, (TimeDelta, &Backup)> = BTreeMap::new();

        for backup in backups {
            let (edge, delta) = shape.nearest_boundary(backup.timestamp);
            if edge < self.min_time {
                continue;
            }
            match by_bin.entry(edge) {
                Entry::Vacant(slot) => {
                    slot.insert((delta, backup));
                }
                Entry::Occupied(mut slot) => {
                    if (delta, backup) < *slot.get() {
                        slot.insert((delta, backup));
                    }
                }
            }
        }

        by_bin.into_values().map(|(_, b)| b.clone()).collect()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
