//! Service layer for snapkeep
//!
//! Business logic on top of the archiver and the retention engine.

pub mod prune;

pub use prune::{PruneReport, PruneService};
