//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    io,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use launchpad_core::application::ports::Filesystem;

/// In-memory filesystem for testing.
///
/// Mirrors real filesystem semantics where the transactional store relies on
/// them: `create_dir` is single-level and requires the parent, `remove_dir`
/// refuses non-empty directories, missing removal targets yield
/// `ErrorKind::NotFound`.
///
/// Failure injection (`fail_writes_on`, `fail_dir_on`) drives the
/// all-or-nothing property tests.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, Vec<u8>>,
    directories: HashSet<PathBuf>,
    executables: HashSet<PathBuf>,
    fail_write_paths: HashSet<PathBuf>,
    fail_dir_paths: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Pre-create a directory without going through the port (testing helper).
    pub fn seed_dir(&self, path: impl Into<PathBuf>) {
        let mut inner = self.inner.write().unwrap();
        let mut current = PathBuf::new();
        for component in path.into().components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }
    }

    /// Pre-create a file without going through the port (testing helper).
    pub fn seed_file(&self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        let mut inner = self.inner.write().unwrap();
        inner.files.insert(path.into(), content.into());
    }

    /// Make writes to this exact path fail with `PermissionDenied`.
    pub fn fail_writes_on(&self, path: impl Into<PathBuf>) {
        let mut inner = self.inner.write().unwrap();
        inner.fail_write_paths.insert(path.into());
    }

    /// Make directory creation at this exact path fail with `PermissionDenied`.
    pub fn fail_dir_on(&self, path: impl Into<PathBuf>) {
        let mut inner = self.inner.write().unwrap();
        inner.fail_dir_paths.insert(path.into());
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<Vec<u8>> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// Check if a file is marked executable.
    pub fn is_executable(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.executables.contains(path)
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        inner.files.keys().cloned().collect()
    }

    /// List all directories.
    pub fn list_dirs(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        inner.directories.iter().cloned().collect()
    }

    /// True when no file or directory exists.
    pub fn is_empty(&self) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.is_empty() && inner.directories.is_empty()
    }

    /// Clear all contents.
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.files.clear();
        inner.directories.clear();
        inner.executables.clear();
    }

    fn lock_write(
        &self,
    ) -> io::Result<std::sync::RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .write()
            .map_err(|_| io::Error::other("memory filesystem lock poisoned"))
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        let mut inner = self.lock_write()?;

        if inner.fail_dir_paths.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "injected create_dir failure",
            ));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    "parent directory does not exist",
                ));
            }
        }

        inner.directories.insert(path.to_path_buf());
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        let mut inner = self.lock_write()?;

        if inner.fail_write_paths.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "injected write failure",
            ));
        }

        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn set_executable(&self, path: &Path, executable: bool) -> io::Result<()> {
        let mut inner = self.lock_write()?;

        if executable {
            inner.executables.insert(path.to_path_buf());
        } else {
            inner.executables.remove(path);
        }

        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let mut inner = self.lock_write()?;
        match inner.files.remove(path) {
            Some(_) => {
                inner.executables.remove(path);
                Ok(())
            }
            None => Err(io::Error::new(io::ErrorKind::NotFound, "no such file")),
        }
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        let mut inner = self.lock_write()?;

        if !inner.directories.contains(path) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such directory"));
        }

        let occupied = inner
            .files
            .keys()
            .map(|p| p.as_path())
            .chain(inner.directories.iter().map(|p| p.as_path()))
            .any(|p| p != path && p.starts_with(path));
        if occupied {
            return Err(io::Error::other("directory not empty"));
        }

        inner.directories.remove(path);
        Ok(())
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
