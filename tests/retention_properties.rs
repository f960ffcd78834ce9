//! Property-based tests for the retention engine.
//!
//! Verifies invariants that must hold for any backup set:
//! - window rules keep exactly the backups at or after the cutoff
//! - binned rules keep at most one backup per bin boundary
//! - evaluation is deterministic
//! - kept and stale sets partition the input

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Weekday};
use proptest::prelude::*;

use snapkeep::models::Backup;
use snapkeep::retention::{compute_stale, BinShape, Policy, Rule};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2014, 7, 4)
        .unwrap()
        .and_hms_opt(12, 43, 0)
        .unwrap()
}

// =============================================================================
// Proptest strategies
// =============================================================================

/// Backups spread over the ~6 years before `now`, with colliding timestamps
/// likely enough to exercise the identifier tie-break.
fn arb_backups() -> impl Strategy<Value = Vec<Backup>> {
    prop::collection::vec((0i64..6 * 365 * 24 * 4, 0u8..4), 0..200).prop_map(|raw| {
        raw.into_iter()
            .map(|(quarter_hours, tag)| {
                let t = now() - TimeDelta::minutes(quarter_hours * 15);
                Backup::new(t, format!("{}-{}", t.format("%Y%m%d%H%M"), tag))
            })
            .collect()
    })
}

fn arb_shape() -> impl Strategy<Value = BinShape> {
    prop_oneof![
        Just(BinShape::Daily),
        Just(BinShape::weekly()),
        Just(BinShape::Weekly(Weekday::Mon)),
        Just(BinShape::Monthly),
        Just(BinShape::Yearly),
    ]
}

fn arb_days() -> impl Strategy<Value = i64> {
    0i64..=5 * 365
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn window_rule_keeps_exactly_recent(backups in arb_backups(), hours in 0i64..2000) {
        let rule = Rule::keep_all(TimeDelta::hours(hours), now()).unwrap();
        let kept = rule.keepers(&backups);
        for backup in &backups {
            prop_assert_eq!(kept.contains(backup), backup.timestamp >= rule.min_time());
        }
    }

    #[test]
    fn binned_rule_keeps_one_per_bin(
        backups in arb_backups(),
        shape in arb_shape(),
        days in arb_days(),
    ) {
        let rule = Rule::binned(shape, TimeDelta::days(days), now()).unwrap();
        let kept = rule.keepers(&backups);

        let mut edges = BTreeSet::new();
        for backup in &kept {
            let (edge, _) = shape.nearest_boundary(backup.timestamp);
            prop_assert!(edge >= rule.min_time());
            prop_assert!(edges.insert(edge), "two keepers share boundary {}", edge);
        }
    }

    #[test]
    fn binned_rule_keeps_closest_in_bin(
        backups in arb_backups(),
        shape in arb_shape(),
        days in arb_days(),
    ) {
        let rule = Rule::binned(shape, TimeDelta::days(days), now()).unwrap();
        let kept = rule.keepers(&backups);

        for keeper in &kept {
            let (edge, best) = shape.nearest_boundary(keeper.timestamp);
            for other in &backups {
                let (other_edge, delta) = shape.nearest_boundary(other.timestamp);
                if other_edge == edge {
                    prop_assert!((best, keeper) <= (delta, other));
                }
            }
        }
    }

    #[test]
    fn evaluation_is_deterministic(backups in arb_backups(), shape in arb_shape(), days in arb_days()) {
        let rule = Rule::binned(shape, TimeDelta::days(days), now()).unwrap();
        prop_assert_eq!(rule.keepers(&backups), rule.keepers(&backups));

        let mut reversed = backups.clone();
        reversed.reverse();
        prop_assert_eq!(rule.keepers(&backups), rule.keepers(&reversed));
    }

    #[test]
    fn stale_and_kept_partition_input(backups in arb_backups()) {
        let policy = Policy::default_at(now()).unwrap();
        let kept = policy.keepers(&backups);
        let stale = compute_stale(&backups, &policy);

        prop_assert!(kept.is_disjoint(&stale));
        let all: BTreeSet<Backup> = backups.iter().cloned().collect();
        let union: BTreeSet<Backup> = kept.union(&stale).cloned().collect();
        prop_assert_eq!(union, all);
    }
}
