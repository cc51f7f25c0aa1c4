//! The `ProjectConfig` aggregate root and its builder.
//!
//! A `ProjectConfig` is the fully-resolved, frozen description of the project
//! the user wants generated. It is produced once by the configuration layer
//! (CLI flags today, interactive prompts upstream) and is read-only from the
//! pipeline's point of view; once a `ProjectConfig` exists it is guaranteed
//! consistent.
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Observability is the responsibility
//! of the application and CLI layers, not the domain.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── Value objects ─────────────────────────────────────────────────────────────

/// A validated project name.
///
/// Guaranteed non-empty, free of path separators, not starting with a dot,
/// and composed of alphanumerics, hyphens, and underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();

        let reason = if name.is_empty() {
            Some("name cannot be empty")
        } else if name.starts_with('.') {
            Some("name cannot start with '.'")
        } else if name.contains('/') || name.contains('\\') {
            Some("name cannot contain path separators")
        } else if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            Some("name may only contain alphanumerics, '-' and '_'")
        } else if name.len() > 214 {
            // npm package name limit; the manifest reuses the project name.
            Some("name is too long (max 214 characters)")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DomainError::InvalidProjectName {
                name,
                reason: reason.into(),
            }),
            None => Ok(Self(name)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// TCP port for the generated service, confined to 1–65535.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    pub fn new(value: u32) -> Result<Self, DomainError> {
        match u16::try_from(value) {
            Ok(v) if v > 0 => Ok(Self(v)),
            _ => Err(DomainError::InvalidPort { value }),
        }
    }

    pub const fn get(&self) -> u16 {
        self.0
    }
}

impl Default for Port {
    fn default() -> Self {
        Self(3000)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the generated project renders responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateMode {
    /// Server-rendered views through a template engine.
    DynamicTemplate,
    /// Static HTML pages served from a views directory.
    StaticHtml,
    /// JSON API only, no view layer.
    #[default]
    ApiOnly,
}

impl TemplateMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DynamicTemplate => "dynamic",
            Self::StaticHtml => "static",
            Self::ApiOnly => "api",
        }
    }
}

impl FromStr for TemplateMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dynamic" | "dynamic-template" => Ok(Self::DynamicTemplate),
            "static" | "static-html" => Ok(Self::StaticHtml),
            "api" | "api-only" => Ok(Self::ApiOnly),
            other => Err(DomainError::UnknownTemplateMode(other.into())),
        }
    }
}

impl fmt::Display for TemplateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Datastore the generated project is wired for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Datastore {
    #[default]
    None,
    MySql,
    Postgres,
    Mongo,
}

impl Datastore {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::MySql => "mysql",
            Self::Postgres => "postgres",
            Self::Mongo => "mongo",
        }
    }
}

impl FromStr for Datastore {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "mysql" => Ok(Self::MySql),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "mongo" | "mongodb" => Ok(Self::Mongo),
            other => Err(DomainError::UnknownDatastore(other.into())),
        }
    }
}

impl fmt::Display for Datastore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional capabilities of the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureSet {
    pub authentication: bool,
    pub linting: bool,
    pub testing: bool,
    pub containerization: bool,
    pub api_docs: bool,
}

impl FeatureSet {
    /// Names of the enabled features, for display and reports.
    pub fn enabled(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.authentication {
            names.push("authentication");
        }
        if self.linting {
            names.push("linting");
        }
        if self.testing {
            names.push("testing");
        }
        if self.containerization {
            names.push("containerization");
        }
        if self.api_docs {
            names.push("api-docs");
        }
        names
    }
}

// ── Aggregate root ────────────────────────────────────────────────────────────

/// The frozen set of generation choices.
///
/// Constructed before the pipeline starts, never mutated by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectConfig {
    name: ProjectName,
    template_mode: TemplateMode,
    datastore: Datastore,
    features: FeatureSet,
    port: Port,
    init_version_control: bool,
}

impl ProjectConfig {
    /// Start building a config for the given project name.
    ///
    /// The name is validated at `build()`, so a bad name surfaces as a
    /// `DomainError` rather than a panic.
    pub fn builder(name: impl Into<String>) -> ProjectConfigBuilder {
        ProjectConfigBuilder::new(name)
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }
    pub const fn template_mode(&self) -> TemplateMode {
        self.template_mode
    }
    pub const fn datastore(&self) -> Datastore {
        self.datastore
    }
    pub const fn features(&self) -> &FeatureSet {
        &self.features
    }
    pub const fn port(&self) -> Port {
        self.port
    }
    pub const fn init_version_control(&self) -> bool {
        self.init_version_control
    }
}

impl fmt::Display for ProjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}, port {})",
            self.name, self.template_mode, self.datastore, self.port
        )
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Fallible builder for [`ProjectConfig`].
#[derive(Debug, Clone)]
pub struct ProjectConfigBuilder {
    name: String,
    template_mode: TemplateMode,
    datastore: Datastore,
    features: FeatureSet,
    port: u32,
    init_version_control: bool,
}

impl ProjectConfigBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template_mode: TemplateMode::default(),
            datastore: Datastore::default(),
            features: FeatureSet::default(),
            port: u32::from(Port::default().get()),
            init_version_control: false,
        }
    }

    pub fn template_mode(mut self, mode: TemplateMode) -> Self {
        self.template_mode = mode;
        self
    }

    pub fn datastore(mut self, datastore: Datastore) -> Self {
        self.datastore = datastore;
        self
    }

    pub fn features(mut self, features: FeatureSet) -> Self {
        self.features = features;
        self
    }

    pub fn port(mut self, port: u32) -> Self {
        self.port = port;
        self
    }

    pub fn init_version_control(mut self, enabled: bool) -> Self {
        self.init_version_control = enabled;
        self
    }

    /// Validate every field and freeze the configuration.
    pub fn build(self) -> Result<ProjectConfig, DomainError> {
        Ok(ProjectConfig {
            name: ProjectName::new(self.name)?,
            template_mode: self.template_mode,
            datastore: self.datastore,
            features: self.features,
            port: Port::new(self.port)?,
            init_version_control: self.init_version_control,
        })
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
