//! File artifacts produced by template resolution.
//!
//! An artifact is pure data: where a generated file goes, what bytes it
//! holds, and which permissions it needs. The engine never interprets the
//! content.

use crate::domain::path_guard::SafePath;

/// A single generated file ready for materialization.
#[derive(Debug, Clone)]
pub struct FileArtifact {
    pub destination: SafePath,
    pub content: Vec<u8>,
    pub permissions: Permissions,
}

impl FileArtifact {
    pub fn new(destination: SafePath, content: impl Into<Vec<u8>>) -> Self {
        Self {
            destination,
            content: content.into(),
            permissions: Permissions::default(),
        }
    }

    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Capability-based permissions model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    readable: bool,
    writable: bool,
    executable: bool,
}

impl Permissions {
    pub const fn read_only() -> Self {
        Self {
            readable: true,
            writable: false,
            executable: false,
        }
    }

    pub const fn read_write() -> Self {
        Self {
            readable: true,
            writable: true,
            executable: false,
        }
    }

    pub const fn executable() -> Self {
        Self {
            readable: true,
            writable: true,
            executable: true,
        }
    }

    pub const fn readable(&self) -> bool {
        self.readable
    }
    pub const fn writable(&self) -> bool {
        self.writable
    }
    pub const fn executable_flag(&self) -> bool {
        self.executable
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::read_write()
    }
}
