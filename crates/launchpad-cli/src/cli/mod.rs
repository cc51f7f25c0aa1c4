//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "launchpad",
    bin_name = "launchpad",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f680} Transactional backend project generator",
    long_about = "Launchpad generates production-ready backend projects: \
                  directory skeleton, config files, dependencies, git init. \
                  A failed run rolls back completely - no half-built projects.",
    after_help = "EXAMPLES:\n\
        \x20 launchpad new my-api\n\
        \x20 launchpad new my-api  --mode api --datastore postgres --git\n\
        \x20 launchpad new my-app  --mode dynamic --auth --tests --port 8080\n\
        \x20 launchpad completions bash > /usr/share/bash-completion/completions/launchpad",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new backend project.
    #[command(
        visible_alias = "n",
        about = "Generate a new project",
        after_help = "EXAMPLES:\n\
            \x20 launchpad new my-api\n\
            \x20 launchpad new my-api --datastore mongo --auth --docker\n\
            \x20 launchpad new my-site --mode static --port 8080 --git"
    )]
    New(NewArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 launchpad completions bash > ~/.local/share/bash-completion/completions/launchpad\n\
            \x20 launchpad completions zsh  > ~/.zfunc/_launchpad\n\
            \x20 launchpad completions fish > ~/.config/fish/completions/launchpad.fish"
    )]
    Completions(CompletionsArgs),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `launchpad new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name.  The project is created as `<output>/<name>`.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Template mode.
    #[arg(
        short = 'm',
        long = "mode",
        value_name = "MODE",
        value_enum,
        help = "Template mode (dynamic views, static pages, or api only)"
    )]
    pub mode: Option<Mode>,

    /// Datastore to wire the project for.
    #[arg(
        short = 'd',
        long = "datastore",
        value_name = "DATASTORE",
        value_enum,
        help = "Datastore choice"
    )]
    pub datastore: Option<DatastoreArg>,

    /// Port the generated service listens on.
    #[arg(short = 'p', long = "port", value_name = "PORT", help = "Service port")]
    pub port: Option<u32>,

    /// Output directory the project root is created under.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        default_value = ".",
        help = "Output directory (default: current directory)"
    )]
    pub output: std::path::PathBuf,

    // ── feature flags ─────────────────────────────────────────────────────
    /// Add JWT authentication middleware.
    #[arg(long = "auth", help = "Include authentication middleware")]
    pub auth: bool,

    /// Add linter configuration.
    #[arg(long = "lint", help = "Include linter configuration")]
    pub lint: bool,

    /// Add a test harness and sample test.
    #[arg(long = "tests", help = "Include test setup")]
    pub tests: bool,

    /// Add container build files.
    #[arg(long = "docker", help = "Include Dockerfile")]
    pub docker: bool,

    /// Add API documentation scaffolding.
    #[arg(long = "api-docs", help = "Include API docs scaffolding")]
    pub api_docs: bool,

    /// Initialise a git repository in the project root.
    #[arg(short = 'g', long = "git", help = "Run git init after generation")]
    pub git: bool,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and generate immediately"
    )]
    pub yes: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `launchpad completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Template modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Mode {
    /// Server-rendered views through a template engine.
    Dynamic,
    /// Static HTML pages.
    Static,
    /// JSON API only.
    Api,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dynamic => write!(f, "dynamic"),
            Self::Static => write!(f, "static"),
            Self::Api => write!(f, "api"),
        }
    }
}

/// Datastore choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum DatastoreArg {
    None,
    #[value(name = "mysql")]
    MySql,
    #[value(name = "postgres", alias = "postgresql")]
    Postgres,
    #[value(name = "mongo", alias = "mongodb")]
    Mongo,
}

impl std::fmt::Display for DatastoreArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::MySql => write!(f, "mysql"),
            Self::Postgres => write!(f, "postgres"),
            Self::Mongo => write!(f, "mongo"),
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
