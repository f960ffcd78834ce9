//! User settings for snapkeep
//!
//! Holds the archiver command, the retention rules and audit preferences.
//! Rules are stored as `(keep, within)` pairs and turned into a [`Policy`]
//! anchored at whatever reference time the caller supplies.

use chrono::{NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use super::paths::SnapkeepPaths;
use crate::error::SnapkeepError;
use crate::retention::{parse_span, BinShape, Policy, Rule, RuleKind};

/// What a configured rule keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeepKind {
    /// Every backup in the window
    All,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Configuration form of a retention rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub keep: KeepKind,

    /// Window length, e.g. "32d" or "5y"
    pub within: String,

    /// First day of each weekly bin (weekly rules only, default Saturday)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday: Option<Weekday>,
}

impl RuleSpec {
    pub fn new(keep: KeepKind, within: impl Into<String>) -> Self {
        Self {
            keep,
            within: within.into(),
            weekday: None,
        }
    }

    /// Build the rule this entry describes, anchored at `now`
    pub fn to_rule(&self, now: NaiveDateTime) -> Result<Rule, SnapkeepError> {
        if self.weekday.is_some() && self.keep != KeepKind::Weekly {
            return Err(SnapkeepError::Config(format!(
                "'weekday' only applies to weekly rules, not '{:?}'",
                self.keep
            )));
        }

        let kind = match self.keep {
            KeepKind::All => RuleKind::KeepAll,
            KeepKind::Daily => RuleKind::Binned(BinShape::Daily),
            KeepKind::Weekly => {
                RuleKind::Binned(BinShape::Weekly(self.weekday.unwrap_or(Weekday::Sat)))
            }
            KeepKind::Monthly => RuleKind::Binned(BinShape::Monthly),
            KeepKind::Yearly => RuleKind::Binned(BinShape::Yearly),
        };

        Rule::new(kind, parse_span(&self.within)?, now)
    }
}

fn default_rules() -> Vec<RuleSpec> {
    vec![
        RuleSpec::new(KeepKind::All, "1d"),
        RuleSpec::new(KeepKind::Daily, "3d"),
        RuleSpec::new(KeepKind::Weekly, "32d"),
        RuleSpec::new(KeepKind::Monthly, "365d"),
        RuleSpec::new(KeepKind::Yearly, "5y"),
    ]
}

/// External archival tool settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiverSettings {
    /// Program to run
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed before every subcommand (e.g. `--keyfile`, `--cachedir`)
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_program() -> String {
    "tarsnap".to_string()
}

impl Default for ArchiverSettings {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: Vec::new(),
        }
    }
}

/// Audit log settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSettings {
    /// Record every deleted archive
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Also record what a dry run would have deleted
    #[serde(default)]
    pub audit_dry_runs: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            audit_dry_runs: false,
        }
    }
}

/// User settings for snapkeep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub archiver: ArchiverSettings,

    /// Retention rules, in evaluation order
    #[serde(default = "default_rules")]
    pub rules: Vec<RuleSpec>,

    #[serde(default)]
    pub audit: AuditSettings,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            archiver: ArchiverSettings::default(),
            rules: default_rules(),
            audit: AuditSettings::default(),
        }
    }
}

impl Settings {
    /// Build the retention policy anchored at `now`
    ///
    /// # Errors
    ///
    /// Returns a configuration error for malformed spans, misplaced weekdays,
    /// or an empty rule list (which would mark every backup stale).
    pub fn policy(&self, now: NaiveDateTime) -> Result<Policy, SnapkeepError> {
        if self.rules.is_empty() {
            return Err(SnapkeepError::Config(
                "No retention rules configured; refusing to treat every backup as stale".into(),
            ));
        }

        let rules = self
            .rules
            .iter()
            .map(|spec| spec.to_rule(now))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Policy::new(rules))
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &SnapkeepPaths) -> Result<Self, SnapkeepError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SnapkeepError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SnapkeepError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SnapkeepPaths) -> Result<(), SnapkeepError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SnapkeepError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            SnapkeepError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
