//! Transactional filesystem mutation with ledger-driven rollback.
//!
//! [`TransactionalFileStore`] is the only component permitted to mutate the
//! filesystem during a generation run, and the sole owner of the
//! [`GenerationLedger`]. Every successful creation is appended to the ledger
//! in order; on failure the ledger is replayed in reverse so that child
//! entries are removed before their parents.
//!
//! The store never force-deletes: a directory that still contains entries
//! the ledger does not know about (dropped there by the user or another
//! process mid-run) survives rollback and is reported instead.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::application::ApplicationError;
use crate::application::ports::Filesystem;
use crate::domain::Permissions;
use crate::error::LaunchpadResult;

// ── Ledger ────────────────────────────────────────────────────────────────────

/// What kind of filesystem entry a ledger line refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One recorded creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub kind: EntryKind,
    pub path: PathBuf,
}

/// Ordered record of every filesystem creation in one generation run.
///
/// Invariant: every path in the ledger exists on disk, in creation order
/// (parents before children), so reverse replay deletes children first.
#[derive(Debug, Default)]
pub struct GenerationLedger {
    entries: Vec<LedgerEntry>,
}

impl GenerationLedger {
    fn record(&mut self, kind: EntryKind, path: &Path) {
        self.entries.push(LedgerEntry {
            kind,
            path: path.to_path_buf(),
        });
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_of(&self, kind: EntryKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }
}

// ── Rollback report ───────────────────────────────────────────────────────────

/// A ledger entry that survived the rollback sweep.
#[derive(Debug, Clone)]
pub struct RollbackFailure {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub reason: String,
}

/// Outcome of one rollback sweep.
///
/// The sweep always visits every ledger entry; partial rollback is strictly
/// better than no rollback, so individual failures are collected rather than
/// aborting.
#[derive(Debug, Default)]
pub struct RollbackReport {
    attempted: usize,
    failures: Vec<RollbackFailure>,
}

impl RollbackReport {
    pub fn attempted(&self) -> usize {
        self.attempted
    }

    pub fn failures(&self) -> &[RollbackFailure] {
        &self.failures
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Convert into a result, for callers that treat leftovers as an error.
    pub fn into_result(self) -> Result<(), ApplicationError> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(ApplicationError::RollbackIncomplete {
                leftover: self.failures.into_iter().map(|f| f.path).collect(),
            })
        }
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// Filesystem writer with all-or-nothing semantics.
///
/// Scoped to a single generation run: the ledger is created with the store
/// and either discarded on commit (drop) or consumed by [`Self::rollback`].
pub struct TransactionalFileStore<'fs> {
    fs: &'fs dyn Filesystem,
    ledger: GenerationLedger,
}

impl<'fs> TransactionalFileStore<'fs> {
    pub fn new(fs: &'fs dyn Filesystem) -> Self {
        Self {
            fs,
            ledger: GenerationLedger::default(),
        }
    }

    pub fn ledger(&self) -> &GenerationLedger {
        &self.ledger
    }

    pub fn exists(&self, path: &Path) -> bool {
        self.fs.exists(path)
    }

    /// Create a directory and any missing ancestors, one level at a time.
    ///
    /// Idempotent: an existing directory (or ancestor) is a no-op, not an
    /// error, and produces no ledger entry. Each directory actually created
    /// is recorded individually so rollback can unwind the exact set.
    pub fn create_directory(&mut self, path: &Path) -> LaunchpadResult<()> {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if self.fs.exists(&current) {
                continue;
            }
            self.fs
                .create_dir(&current)
                .map_err(|e| ApplicationError::DirectoryCreate {
                    path: current.clone(),
                    reason: e.to_string(),
                })?;
            debug!(path = %current.display(), "directory created");
            self.ledger.record(EntryKind::Directory, &current);
        }
        Ok(())
    }

    /// Write a file, creating its parent directory first if needed.
    ///
    /// The ledger entry is appended only after the write succeeds; a failed
    /// write leaves the ledger untouched.
    pub fn write_file(
        &mut self,
        path: &Path,
        content: &[u8],
        permissions: Permissions,
    ) -> LaunchpadResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.create_directory(parent)?;
            }
        }

        self.fs
            .write_file(path, content)
            .map_err(|e| ApplicationError::FileWrite {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        debug!(path = %path.display(), bytes = content.len(), "file written");
        self.ledger.record(EntryKind::File, path);

        if permissions.executable_flag() {
            self.fs
                .set_executable(path, true)
                .map_err(|e| ApplicationError::FileWrite {
                    path: path.to_path_buf(),
                    reason: format!("failed to set permissions: {e}"),
                })?;
        }

        Ok(())
    }

    /// Undo every ledger entry in reverse creation order.
    ///
    /// Files already absent count as removed. Directories are removed only
    /// when empty. The sweep visits every entry regardless of earlier
    /// failures and reports the survivors.
    pub fn rollback(&mut self) -> RollbackReport {
        let mut report = RollbackReport::default();

        for entry in self.ledger.entries.iter().rev() {
            report.attempted += 1;

            let result = match entry.kind {
                EntryKind::File => self.fs.remove_file(&entry.path),
                EntryKind::Directory => self.fs.remove_dir(&entry.path),
            };

            match result {
                Ok(()) => debug!(path = %entry.path.display(), "rolled back"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!(path = %entry.path.display(), "already absent")
                }
                Err(e) => {
                    warn!(path = %entry.path.display(), error = %e, "rollback entry failed");
                    report.failures.push(RollbackFailure {
                        path: entry.path.clone(),
                        kind: entry.kind,
                        reason: e.to_string(),
                    });
                }
            }
        }

        self.ledger.entries.clear();
        report
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
