//! Audit logging for snapkeep
//!
//! Records every archive removed by a prune run in an append-only,
//! line-delimited JSON log. The log is history for humans; retention
//! decisions never read it.
//!
//! # Example
//!
//! ```rust,ignore
//! use snapkeep::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entries: Vec<AuditEntry> = stale
//!     .iter()
//!     .map(|b| AuditEntry::deleted(b, policy_labels.clone()))
//!     .collect();
//! logger.log_batch(&entries)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
