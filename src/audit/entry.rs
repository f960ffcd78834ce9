//! Audit entry data structures
//!
//! One entry is written per archive removed (or, for audited dry runs, per
//! archive that would have been removed).

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Backup, TIMESTAMP_FORMAT};

/// What happened to the archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Archive was deleted
    Delete,
    /// Archive would have been deleted (dry run)
    WouldDelete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Delete => write!(f, "DELETE"),
            Operation::WouldDelete => write!(f, "WOULD-DELETE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the prune ran (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Archive identifier
    pub archive: String,

    /// When the archive itself was taken
    pub archived_at: NaiveDateTime,

    /// Labels of the rules in effect, so a deletion can be explained later
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub policy: Vec<String>,
}

impl AuditEntry {
    /// Create an entry for a deleted backup
    pub fn deleted(backup: &Backup, policy: Vec<String>) -> Self {
        Self::new(Operation::Delete, backup, policy)
    }

    /// Create an entry for a backup a dry run would have deleted
    pub fn would_delete(backup: &Backup, policy: Vec<String>) -> Self {
        Self::new(Operation::WouldDelete, backup, policy)
    }

    fn new(operation: Operation, backup: &Backup, policy: Vec<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            archive: backup.identifier.clone(),
            archived_at: backup.timestamp,
            policy,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} (taken {})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.archive,
            self.archived_at.format(TIMESTAMP_FORMAT)
        );

        if !self.policy.is_empty() {
            output.push_str(&format!("\n  Policy: {}", self.policy.join(", ")));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn backup() -> Backup {
        Backup::new(
            NaiveDate::from_ymd_opt(2014, 6, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            "host-2014-06-01",
        )
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Delete.to_string(), "DELETE");
        assert_eq!(Operation::WouldDelete.to_string(), "WOULD-DELETE");
    }

    #[test]
    fn test_deleted_entry() {
        let entry = AuditEntry::deleted(&backup(), vec!["all<1d".into()]);
        assert_eq!(entry.operation, Operation::Delete);
        assert_eq!(entry.archive, "host-2014-06-01");
        assert_eq!(entry.archived_at, backup().timestamp);
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::would_delete(&backup(), Vec::new());

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"would_delete\""));
        assert!(!json.contains("policy"));

        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.operation, Operation::WouldDelete);
        assert_eq!(deserialized.archive, entry.archive);
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::deleted(&backup(), vec!["daily<3d".into(), "yearly<5y".into()]);

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("DELETE"));
        assert!(formatted.contains("host-2014-06-01"));
        assert!(formatted.contains("2014-06-01 08:00:00"));
        assert!(formatted.contains("daily<3d, yearly<5y"));
    }
}
