//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
///
/// Variants carry the underlying cause as a rendered `reason` string so the
/// whole tree stays `Clone` for retry/report plumbing.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A directory could not be created.
    #[error("Failed to create directory {path}: {reason}")]
    DirectoryCreate { path: PathBuf, reason: String },

    /// A file could not be written.
    #[error("Failed to write file {path}: {reason}")]
    FileWrite { path: PathBuf, reason: String },

    /// The external command could not be started at all.
    #[error("Failed to spawn '{command}': {reason}")]
    Spawn { command: String, reason: String },

    /// The external command exceeded its wall-clock budget and was killed.
    #[error("'{command}' timed out after {} seconds", .timeout.as_secs())]
    InstallTimeout { command: String, timeout: Duration },

    /// The external command exited non-zero.
    #[error("'{command}' failed{}", exit_code_suffix(.exit_code))]
    InstallFailed {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    /// Rollback could not remove every ledger entry.
    #[error("Rollback incomplete: {} leftover path(s) require manual cleanup", .leftover.len())]
    RollbackIncomplete { leftover: Vec<PathBuf> },

    /// Target root already exists; generation refuses to merge into it.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },
}

fn exit_code_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {code}"),
        None => " (killed by signal)".into(),
    }
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DirectoryCreate { path, .. } | Self::FileWrite { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
            Self::Spawn { command, .. } => vec![
                format!("Could not start '{}'", command),
                "Ensure the package manager is installed and in your PATH".into(),
            ],
            Self::InstallTimeout { timeout, .. } => vec![
                format!(
                    "Installation did not finish within {} seconds",
                    timeout.as_secs()
                ),
                "Check your network connection".into(),
                "Raise the timeout in the configuration file".into(),
            ],
            Self::InstallFailed { stderr, .. } => {
                let mut suggestions = vec![
                    "The package manager reported an error".into(),
                    "Re-run with -v to see the full output".into(),
                ];
                if let Some(line) = stderr.lines().rev().find(|l| !l.trim().is_empty()) {
                    suggestions.push(format!("Last error line: {}", line.trim()));
                }
                suggestions
            }
            Self::RollbackIncomplete { leftover } => {
                let mut suggestions =
                    vec!["These paths could not be removed automatically:".into()];
                for path in leftover {
                    suggestions.push(format!("  {}", path.display()));
                }
                suggestions.push("Remove them manually before retrying".into());
                suggestions
            }
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                format!("Or remove it first: rm -rf {}", path.display()),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DirectoryCreate { .. } | Self::FileWrite { .. } => ErrorCategory::Internal,
            Self::Spawn { .. } | Self::InstallTimeout { .. } | Self::InstallFailed { .. } => {
                ErrorCategory::External
            }
            Self::RollbackIncomplete { .. } => ErrorCategory::Internal,
            Self::ProjectExists { .. } => ErrorCategory::Conflict,
        }
    }
}
