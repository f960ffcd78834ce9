//! Custom error types for snapkeep
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for snapkeep operations
#[derive(Error, Debug)]
pub enum SnapkeepError {
    /// Configuration-related errors (bad rule spans, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A backup listing (or timestamp argument) could not be parsed
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// An external command exited unsuccessfully
    #[error("Command `{command}` failed: {status}")]
    Command { command: String, status: String },

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl SnapkeepError {
    /// Create a parse error for a given 1-based line number
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create a command failure error
    pub fn command(command: impl Into<String>, status: impl ToString) -> Self {
        Self::Command {
            command: command.into(),
            status: status.to_string(),
        }
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a parse error
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

impl From<std::io::Error> for SnapkeepError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SnapkeepError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for snapkeep operations
pub type SnapkeepResult<T> = Result<T, SnapkeepError>;
