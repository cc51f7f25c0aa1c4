//! Package selection derived from the configuration.
//!
//! Maps datastore choice and feature flags to the third-party packages the
//! generated project depends on. The tables below are the single source of
//! truth; the pipeline turns the selection into package-manager invocations
//! without inspecting it.

use serde::Serialize;

use crate::domain::project_config::{Datastore, ProjectConfig, TemplateMode};

/// The runtime and development package lists for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSelection {
    pub runtime: Vec<&'static str>,
    pub development: Vec<&'static str>,
}

impl PackageSelection {
    pub fn is_empty(&self) -> bool {
        self.runtime.is_empty() && self.development.is_empty()
    }
}

/// Derive the package lists for a configuration.
pub fn select_packages(config: &ProjectConfig) -> PackageSelection {
    let mut runtime = vec!["express", "dotenv", "cors", "morgan"];
    let mut development = vec!["nodemon"];

    if config.template_mode() == TemplateMode::DynamicTemplate {
        runtime.push("ejs");
    }

    match config.datastore() {
        Datastore::None => {}
        Datastore::MySql => runtime.push("mysql2"),
        Datastore::Postgres => runtime.push("pg"),
        Datastore::Mongo => runtime.push("mongoose"),
    }

    let features = config.features();
    if features.authentication {
        runtime.extend(["jsonwebtoken", "bcryptjs"]);
    }
    if features.api_docs {
        runtime.extend(["swagger-ui-express", "swagger-jsdoc"]);
    }
    if features.linting {
        development.push("eslint");
    }
    if features.testing {
        development.extend(["jest", "supertest"]);
    }

    PackageSelection {
        runtime,
        development,
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
