//! Path management for snapkeep
//!
//! ## Path Resolution Order
//!
//! 1. `SNAPKEEP_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/snapkeep` on Linux, `~/Library/Application Support/snapkeep`
//!    on macOS, `%APPDATA%\snapkeep\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::SnapkeepError;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "SNAPKEEP_CONFIG_DIR";

/// Manages all paths used by snapkeep
#[derive(Debug, Clone)]
pub struct SnapkeepPaths {
    /// Base directory for settings and the audit log
    base_dir: PathBuf,
}

impl SnapkeepPaths {
    /// Create a new SnapkeepPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, SnapkeepError> {
        let base_dir = if let Ok(custom) = std::env::var(CONFIG_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create SnapkeepPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), SnapkeepError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SnapkeepError::Io(format!("Failed to create config directory: {}", e)))
    }

    /// Check if snapkeep has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, SnapkeepError> {
    ProjectDirs::from("", "", "snapkeep")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| SnapkeepError::Config("Could not determine a home directory".into()))
}
