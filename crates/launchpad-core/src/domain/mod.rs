// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Launchpad.
//!
//! This module contains pure business logic with ZERO external dependencies.
//! All I/O — filesystem mutation, subprocess execution — happens behind ports
//! (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No external crates**: Only std library + thiserror + serde derives
//! - **Immutable entities**: All domain objects are Clone + PartialEq
//! - **Rich domain model**: Behavior lives in entities, not services

// Public API - what the world sees
pub mod artifact;
pub mod error;
pub mod packages;
pub mod path_guard;
pub mod project_config;
pub mod skeleton;

// Re-exports for convenience
pub use artifact::{FileArtifact, Permissions};
pub use error::{DomainError, ErrorCategory};
pub use packages::{PackageSelection, select_packages};
pub use path_guard::{PathGuard, SafePath};
pub use project_config::{
    Datastore, FeatureSet, Port, ProjectConfig, ProjectConfigBuilder, ProjectName, TemplateMode,
};
pub use skeleton::directory_skeleton;
