//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `launchpad-adapters` crate provides implementations.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::ApplicationError;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `launchpad_adapters::filesystem::LocalFilesystem` (production)
/// - `launchpad_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Methods return `io::Result` so the transactional store remains the
///   single place where OS failures are classified and wrapped. Rollback in
///   particular needs to see `ErrorKind::NotFound` to tolerate entries that
///   are already gone.
/// - `create_dir` creates exactly one level; the store walks ancestors
///   itself so every created directory lands in the ledger individually.
pub trait Filesystem: Send + Sync {
    /// Check if path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Create a single directory. The parent must already exist.
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Write content to a file, overwriting any existing file.
    fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<()>;

    /// Set or clear the executable bit.
    fn set_executable(&self, path: &Path, executable: bool) -> io::Result<()>;

    /// Remove a file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Remove a directory. Fails if the directory is not empty.
    fn remove_dir(&self, path: &Path) -> io::Result<()>;
}

/// One external command invocation: program, arguments, working directory,
/// and the wall-clock budget it must finish within.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub timeout: Duration,
}

impl CommandRequest {
    pub fn new(
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
        working_dir: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            working_dir: working_dir.into(),
            timeout,
        }
    }

    /// The full command line, for logs and error messages.
    pub fn display_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Captured output of a completed (exit 0) command.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Port for running one external command to completion.
///
/// Implemented by:
/// - `launchpad_adapters::process::LocalProcessRunner` (production)
/// - `launchpad_adapters::process::ScriptedRunner` (testing)
///
/// The contract: exit 0 before the timeout resolves `Ok`; a timeout kills
/// the child (never abandons it) and fails with `InstallTimeout`; a non-zero
/// exit fails with `InstallFailed` carrying captured output; a process that
/// cannot be spawned fails with `Spawn`. No retries at this layer.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, request: &CommandRequest) -> Result<CommandOutput, ApplicationError>;
}
