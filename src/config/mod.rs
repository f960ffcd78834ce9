//! Configuration module for snapkeep
//!
//! This module provides configuration management including:
//! - Config directory resolution
//! - Settings persistence (archiver command, retention rules, audit)

pub mod paths;
pub mod settings;

pub use paths::SnapkeepPaths;
pub use settings::{KeepKind, RuleSpec, Settings};
