//! Infrastructure adapters for Launchpad.
//!
//! This crate implements the ports defined in
//! `launchpad_core::application::ports`. It contains all external
//! dependencies and I/O operations.

pub mod filesystem;
pub mod process;
pub mod templates;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{LocalProcessRunner, ScriptedRunner};
pub use templates::resolve_artifacts;
