// ============================================================================
// domain/error.rs - ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid port {value}: must be between 1 and 65535")]
    InvalidPort { value: u32 },

    #[error("Unknown template mode '{0}'")]
    UnknownTemplateMode(String),

    #[error("Unknown datastore '{0}'")]
    UnknownDatastore(String),

    // ========================================================================
    // Path Confinement Errors
    // ========================================================================
    #[error("Path '{path}' escapes the project root")]
    PathTraversal { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Empty path not allowed")]
    EmptyPath,
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name, reason } => vec![
                format!("Project name '{}' is invalid: {}", name, reason),
                "Use alphanumeric characters, hyphens, and underscores".into(),
                "Examples: my-api, my_service, backend123".into(),
            ],
            Self::InvalidPort { value } => vec![
                format!("{} is outside the valid port range", value),
                "Choose a port between 1 and 65535 (e.g. 3000, 8080)".into(),
            ],
            Self::UnknownTemplateMode(mode) => vec![
                format!("'{}' is not a template mode", mode),
                "Supported modes: dynamic, static, api".into(),
            ],
            Self::UnknownDatastore(ds) => vec![
                format!("'{}' is not a supported datastore", ds),
                "Supported datastores: none, mysql, postgres, mongo".into(),
            ],
            Self::PathTraversal { path } => vec![
                format!("'{}' would write outside the project directory", path),
                "Remove '..' segments from the path".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        // Every domain failure is a rejected input; nothing here is a bug
        // in Launchpad itself.
        ErrorCategory::Validation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
