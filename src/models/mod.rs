//! Core data models for snapkeep
//!
//! Backups are supplied by an archiver and only ever classified, never
//! created or destroyed by the retention engine.

pub mod backup;

pub use backup::{parse_timestamp, Backup, TIMESTAMP_FORMAT};
