//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use launchpad_core::application::ports::Filesystem;

/// Production filesystem implementation using `std::fs`.
///
/// Methods are thin passthroughs; error classification is the transactional
/// store's job, so `io::Error` flows upward untouched.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir(path)
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn set_executable(&self, path: &Path, executable: bool) -> io::Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = std::fs::metadata(path)?;
            let mut perms = metadata.permissions();
            let mode = perms.mode();
            if executable {
                perms.set_mode(mode | 0o111);
            } else {
                perms.set_mode(mode & !0o111);
            }
            std::fs::set_permissions(path, perms)?;
        }
        #[cfg(windows)]
        {
            // Windows doesn't have an executable bit in the same way
            let _ = (path, executable);
        }
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir(path)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
