//! Tarsnap archiver
//!
//! Lists archives with `tarsnap --list-archives -v` and deletes stale ones
//! with a single `tarsnap -d -f <name> -f <name> ...` invocation.

use std::process::{Command, Stdio};

use super::listing::parse_listing;
use super::Archiver;
use crate::config::settings::ArchiverSettings;
use crate::error::{SnapkeepError, SnapkeepResult};
use crate::models::Backup;

/// Runs the tarsnap command-line client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tarsnap {
    program: String,
    args: Vec<String>,
}

impl Tarsnap {
    /// Create a new Tarsnap archiver
    ///
    /// `args` are inserted before every subcommand, which is where options
    /// such as `--keyfile` or `--cachedir` belong.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_settings(settings: &ArchiverSettings) -> Self {
        Self::new(settings.program.clone(), settings.args.clone())
    }

    /// Argument vector for listing archives
    pub fn list_command(&self) -> Vec<String> {
        let mut argv = self.base_command();
        argv.extend(["--list-archives".to_string(), "-v".to_string()]);
        argv
    }

    /// Argument vector deleting every backup in `stale`, in sorted order
    pub fn delete_command(&self, stale: &[Backup]) -> Vec<String> {
        let mut sorted: Vec<&Backup> = stale.iter().collect();
        sorted.sort();

        let mut argv = self.base_command();
        argv.push("-d".to_string());
        for backup in sorted {
            argv.push("-f".to_string());
            argv.push(backup.identifier.clone());
        }
        argv
    }

    fn base_command(&self) -> Vec<String> {
        let mut argv = vec![self.program.clone()];
        argv.extend(self.args.iter().cloned());
        argv
    }
}

impl Archiver for Tarsnap {
    fn name(&self) -> &str {
        &self.program
    }

    fn list_backups(&self) -> SnapkeepResult<Vec<Backup>> {
        let argv = self.list_command();
        tracing::debug!(command = %display_command(&argv), "listing archives");

        let output = command_for(&argv)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| SnapkeepError::Io(format!("Failed to run {}: {}", self.program, e)))?;

        // Never hand a listing from a failed run to the policy.
        if !output.status.success() {
            return Err(SnapkeepError::command(display_command(&argv), output.status));
        }

        let stdout = String::from_utf8(output.stdout).map_err(|_| {
            SnapkeepError::Io(format!("{} printed a listing that is not UTF-8", self.program))
        })?;

        let backups = parse_listing(&stdout)?;
        tracing::info!(count = backups.len(), "listed archives");
        Ok(backups)
    }

    /// Echoes the command line to stdout, then runs it
    fn delete(&self, stale: &[Backup]) -> SnapkeepResult<()> {
        if stale.is_empty() {
            return Ok(());
        }

        let argv = self.delete_command(stale);
        let shown = display_command(&argv);
        tracing::info!(command = %shown, count = stale.len(), "deleting archives");
        println!("{}", shown);

        let status = command_for(&argv)
            .stdin(Stdio::null())
            .status()
            .map_err(|e| SnapkeepError::Io(format!("Failed to run {}: {}", self.program, e)))?;

        if !status.success() {
            return Err(SnapkeepError::command(shown, status));
        }
        Ok(())
    }
}

fn command_for(argv: &[String]) -> Command {
    let mut command = Command::new(&argv[0]);
    command.args(&argv[1..]);
    command
}

/// Render an argument vector for logs, quoting words that need it
pub fn display_command(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| {
            let plain = !arg.is_empty()
                && arg
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));
            if plain {
                arg.clone()
            } else {
                format!("'{}'", arg.replace('\'', r"'\''"))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
