//! Retention rule engine
//!
//! Decides which backups to keep under a grandfather-father-son policy.
//!
//! # Architecture
//!
//! - `BinShape`: calendar bins (daily, weekly, monthly, yearly) with
//!   `floor`/`ceil` boundaries
//! - `Rule`: a window rule (keep everything recent) or a binned rule (keep
//!   one backup per bin), anchored at an explicit reference time
//! - `Policy`: an ordered list of rules whose keep-sets are unioned
//!
//! Evaluation is a pure function of the backups, the rules and the reference
//! time; nothing is cached between calls.
//!
//! # Example
//!
//! ```rust,ignore
//! use snapkeep::retention::{compute_stale, Policy};
//!
//! let now = chrono::Local::now().naive_local();
//! let policy = Policy::default_at(now)?;
//! let stale = compute_stale(&backups, &policy);
//! ```

mod bin;
mod policy;
mod rule;
mod span;

pub use bin::BinShape;
pub use policy::{compute_stale, Decision, Policy, RetentionPlan};
pub use rule::{Rule, RuleKind};
pub use span::{format_span, parse_span};
