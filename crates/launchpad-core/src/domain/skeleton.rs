//! The fixed directory skeleton of a generated project.
//!
//! The skeleton is derived from the configuration alone. Order matters:
//! parents are listed before children, because the store creates directories
//! one level at a time and ledger replay deletes in reverse.

use crate::domain::path_guard::{PathGuard, SafePath};
use crate::domain::project_config::{ProjectConfig, TemplateMode};

/// Subdirectories every generated project gets, relative to the project root.
const BASE_DIRECTORIES: &[&str] = &[
    "source",
    "source/services",
    "source/routes",
    "source/middleware",
    "source/utilities",
    "source/config",
    "assets",
    "assets/styles",
    "assets/scripts",
    "assets/media",
    "assets/uploads",
    "tests",
];

/// Compute the directory skeleton for a configuration.
///
/// Every returned path has passed [`PathGuard`]; the constant tables above
/// are trusted input, so a guard rejection here is a programming error and
/// is unreachable in practice.
pub fn directory_skeleton(config: &ProjectConfig) -> Vec<SafePath> {
    let mode_dirs: &[&str] = match config.template_mode() {
        TemplateMode::DynamicTemplate => &["views", "views/layouts", "views/partials"],
        TemplateMode::StaticHtml => &["views"],
        TemplateMode::ApiOnly => &[],
    };

    BASE_DIRECTORIES
        .iter()
        .chain(mode_dirs)
        .map(|dir| {
            PathGuard::normalize(*dir).unwrap_or_else(|_| {
                unreachable!("skeleton tables contain only confined relative paths")
            })
        })
        .collect()
}

// ── tests ─────────────────────────────────────────────────────────────────────
