//! Application layer for Launchpad.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerationPipeline)
//! - **Store**: Transactional filesystem mutation with rollback
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main services
pub use services::{GenerationPipeline, GenerationReport, HookPolicy, PipelineOptions};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandOutput, CommandRequest, CommandRunner, Filesystem};

pub use error::ApplicationError;
pub use store::{GenerationLedger, RollbackReport, TransactionalFileStore};
