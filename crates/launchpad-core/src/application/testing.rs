//! Test-only in-process filesystem fake shared by the application tests.
//!
//! The full-featured adapters live in `launchpad-adapters`; this small fake
//! exists because the core crate cannot depend on its own adapters. It
//! mirrors real filesystem semantics where the store relies on them:
//! single-level `create_dir`, non-recursive `remove_dir`, `NotFound` errors.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::application::ports::Filesystem;

#[derive(Default)]
struct Inner {
    files: HashMap<PathBuf, Vec<u8>>,
    directories: HashSet<PathBuf>,
    fail_write_paths: HashSet<PathBuf>,
    fail_dir_paths: HashSet<PathBuf>,
}

/// In-memory [`Filesystem`] with failure injection.
#[derive(Clone, Default)]
pub struct TestFilesystem {
    inner: Arc<Mutex<Inner>>,
}

impl TestFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_dir(&self, path: impl Into<PathBuf>) {
        self.inner.lock().unwrap().directories.insert(path.into());
    }

    pub fn seed_file(&self, path: impl Into<PathBuf>) {
        self.inner.lock().unwrap().files.insert(path.into(), Vec::new());
    }

    pub fn delete_file(&self, path: impl AsRef<Path>) {
        self.inner.lock().unwrap().files.remove(path.as_ref());
    }

    /// Make every `write_file` to this exact path fail with `PermissionDenied`.
    pub fn fail_writes_on(&self, path: impl Into<PathBuf>) {
        self.inner.lock().unwrap().fail_write_paths.insert(path.into());
    }

    /// Make `create_dir` of this exact path fail with `PermissionDenied`.
    pub fn fail_dir_on(&self, path: impl Into<PathBuf>) {
        self.inner.lock().unwrap().fail_dir_paths.insert(path.into());
    }

    pub fn has_file(&self, path: impl AsRef<Path>) -> bool {
        self.inner.lock().unwrap().files.contains_key(path.as_ref())
    }

    pub fn has_dir(&self, path: impl AsRef<Path>) -> bool {
        self.inner.lock().unwrap().directories.contains(path.as_ref())
    }

    pub fn file_content(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.inner.lock().unwrap().files.get(path.as_ref()).cloned()
    }

    pub fn is_empty(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.files.is_empty() && inner.directories.is_empty()
    }
}

impl Filesystem for TestFilesystem {
    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        let mut inner = self.inner.lock().unwrap();
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
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_write_paths.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "injected write failure",
            ));
        }
        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn set_executable(&self, _path: &Path, _executable: bool) -> io::Result<()> {
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let mut inner = self.inner.lock().unwrap();
        match inner.files.remove(path) {
            Some(_) => Ok(()),
            None => Err(io::Error::new(io::ErrorKind::NotFound, "no such file")),
        }
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        let mut inner = self.inner.lock().unwrap();
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
