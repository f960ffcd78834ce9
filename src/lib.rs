//! snapkeep - Grandfather-father-son retention for tarsnap archives
//!
//! This library decides which archives to keep and which to delete, given a
//! listing of `(identifier, timestamp)` pairs and a set of retention rules.
//! A rule either keeps everything inside its window, or keeps the backup
//! closest to each calendar boundary (day, week, month, year) in its window.
//! Anything no rule keeps is stale.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `retention`: Rules, bins and the stale-set computation
//! - `models`: The `Backup` type and timestamp parsing
//! - `archive`: Listing and deleting archives through tarsnap
//! - `services`: Plan/prune orchestration
//! - `audit`: JSONL log of deletions
//! - `config`: Configuration and path management
//! - `display`: Terminal tables
//! - `cli`: Command handlers
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use snapkeep::retention::{compute_stale, Policy};
//!
//! let policy = Policy::default_at(now)?;
//! let stale = compute_stale(&backups, &policy);
//! ```

pub mod archive;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod retention;
pub mod services;

pub use error::{SnapkeepError, SnapkeepResult};
