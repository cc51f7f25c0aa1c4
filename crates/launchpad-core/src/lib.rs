//! Launchpad Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Launchpad
//! backend project generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          launchpad-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (GenerationPipeline, file store)       │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │     (Filesystem, CommandRunner)         │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    launchpad-adapters (Infrastructure)  │
//! │ (LocalFilesystem, LocalProcessRunner)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (ProjectConfig, SafePath, FileArtifact) │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use launchpad_core::{
//!     application::{GenerationPipeline, PipelineOptions},
//!     domain::{Datastore, ProjectConfig, TemplateMode},
//! };
//!
//! // 1. Freeze the configuration
//! let config = ProjectConfig::builder("demo")
//!     .template_mode(TemplateMode::ApiOnly)
//!     .datastore(Datastore::None)
//!     .build()
//!     .unwrap();
//!
//! // 2. Run the pipeline (with injected adapters)
//! let pipeline = GenerationPipeline::new(filesystem, runner, PipelineOptions::default());
//! pipeline.generate(&config, &artifacts, "./output".as_ref()).unwrap();
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationPipeline, GenerationReport, PipelineOptions,
        ports::{CommandOutput, CommandRequest, CommandRunner, Filesystem},
        store::{RollbackReport, TransactionalFileStore},
    };
    pub use crate::domain::{
        Datastore, FeatureSet, FileArtifact, PathGuard, Permissions, Port, ProjectConfig,
        ProjectName, SafePath, TemplateMode,
    };
    pub use crate::error::{LaunchpadError, LaunchpadResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
