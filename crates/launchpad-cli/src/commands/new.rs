//! Implementation of the `launchpad new` command.
//!
//! Responsibility: translate CLI arguments into a `ProjectConfig`, call the
//! core generation pipeline, and display results. No business logic lives
//! here.

use tracing::{debug, info, instrument};

use launchpad_adapters::{LocalFilesystem, LocalProcessRunner, resolve_artifacts};
use launchpad_core::{
    application::{GenerationPipeline, PipelineOptions},
    domain::{
        Datastore, FeatureSet, ProjectConfig, TemplateMode, directory_skeleton, select_packages,
    },
};

use crate::{
    cli::{DatastoreArg, Mode, NewArgs, OutputFormat, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `launchpad new` command.
///
/// Dispatch sequence:
/// 1. Convert CLI args to a core `ProjectConfig` (validation included)
/// 2. Confirm with user unless `--yes` or `--quiet`
/// 3. Refuse an existing target directory
/// 4. Early-exit if `--dry-run`
/// 5. Resolve artifacts and run the pipeline
/// 6. Print warnings and next-steps guidance
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Freeze the configuration (name/port validation happens here).
    let project = build_project_config(&args, &config)?;

    debug!(
        mode = %project.template_mode(),
        datastore = %project.datastore(),
        port = %project.port(),
        git = project.init_version_control(),
        "Configuration resolved"
    );

    // 2. Show configuration and confirm
    if !global.quiet && !args.yes && !args.dry_run {
        show_configuration(&project, &args, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    // 3. Check for existing directory (the pipeline re-checks through its
    //    own filesystem port; this is the early, friendlier refusal).
    let project_path = args.output.join(project.name().as_str());
    if project_path.exists() {
        return Err(CliError::ProjectExists { path: project_path });
    }

    // 4. Dry run: describe but do not write.
    if args.dry_run {
        return dry_run(&project, &output);
    }

    // 5. Create adapters and generate
    let pipeline = GenerationPipeline::new(
        Box::new(LocalFilesystem::new()),
        Box::new(LocalProcessRunner::new()),
        PipelineOptions {
            package_manager: config.install.package_manager.clone(),
            install_timeout: config.install.timeout(),
            ..PipelineOptions::default()
        },
    );
    let artifacts = resolve_artifacts(&project).map_err(CliError::Core)?;

    output.header(&format!("Creating '{}'...", project.name()))?;
    info!(project = %project.name(), path = %project_path.display(), "Generation started");

    let report = pipeline
        .generate(&project, &artifacts, &args.output)
        .map_err(CliError::Core)?;

    info!(project = %project.name(), "Generation completed");

    // 6. Warnings + success + next steps
    for warning in &report.warnings {
        output.warning(warning)?;
    }

    output.success(&format!("Project '{}' created!", project.name()))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", project.name()))?;
        output.print("  npm run dev")?;
    }

    Ok(())
}

// ── Configuration construction ────────────────────────────────────────────────

/// Merge CLI flags over config-file defaults into a frozen `ProjectConfig`.
fn build_project_config(args: &NewArgs, config: &AppConfig) -> CliResult<ProjectConfig> {
    let mode = match args.mode {
        Some(mode) => convert_mode(mode),
        None => config
            .defaults
            .mode
            .parse::<TemplateMode>()
            .map_err(|e| CliError::ConfigError {
                message: format!("invalid defaults.mode: {e}"),
                source: None,
            })?,
    };

    let datastore = match args.datastore {
        Some(datastore) => convert_datastore(datastore),
        None => config
            .defaults
            .datastore
            .parse::<Datastore>()
            .map_err(|e| CliError::ConfigError {
                message: format!("invalid defaults.datastore: {e}"),
                source: None,
            })?,
    };

    ProjectConfig::builder(args.name.clone())
        .template_mode(mode)
        .datastore(datastore)
        .features(FeatureSet {
            authentication: args.auth,
            linting: args.lint,
            testing: args.tests,
            containerization: args.docker,
            api_docs: args.api_docs,
        })
        .port(args.port.unwrap_or(config.defaults.port))
        .init_version_control(args.git)
        .build()
        .map_err(|e| CliError::Core(e.into()))
}

// ── Type conversions CLI → core ───────────────────────────────────────────────

fn convert_mode(mode: Mode) -> TemplateMode {
    match mode {
        Mode::Dynamic => TemplateMode::DynamicTemplate,
        Mode::Static => TemplateMode::StaticHtml,
        Mode::Api => TemplateMode::ApiOnly,
    }
}

fn convert_datastore(datastore: DatastoreArg) -> Datastore {
    match datastore {
        DatastoreArg::None => Datastore::None,
        DatastoreArg::MySql => Datastore::MySql,
        DatastoreArg::Postgres => Datastore::Postgres,
        DatastoreArg::Mongo => Datastore::Mongo,
    }
}

// ── Dry run ───────────────────────────────────────────────────────────────────

/// Describe what a run would create without touching disk.
fn dry_run(project: &ProjectConfig, output: &OutputManager) -> CliResult<()> {
    let artifacts = resolve_artifacts(project).map_err(CliError::Core)?;
    let skeleton = directory_skeleton(project);
    let packages = select_packages(project);

    if output.format() == OutputFormat::Json {
        let summary = serde_json::json!({
            "config": project,
            "directories": skeleton.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
            "files": artifacts.iter().map(|a| a.destination.as_str()).collect::<Vec<_>>(),
            "packages": packages,
        });
        output.print(&serde_json::to_string_pretty(&summary).unwrap_or_else(|_| "{}".into()))?;
        return Ok(());
    }

    output.info(&format!("Dry run: would create '{}'", project.name()))?;
    output.print("")?;
    output.print("Directories:")?;
    for dir in &skeleton {
        output.print(&format!("  {dir}"))?;
    }
    output.print("")?;
    output.print("Files:")?;
    for artifact in &artifacts {
        output.print(&format!("  {}", artifact.destination))?;
    }
    output.print("")?;
    output.print(&format!("Runtime packages:     {}", packages.runtime.join(" ")))?;
    output.print(&format!("Development packages: {}", packages.development.join(" ")))?;
    Ok(())
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(
    project: &ProjectConfig,
    args: &NewArgs,
    out: &OutputManager,
) -> CliResult<()> {
    out.header("Configuration")?;
    out.print(&format!("  Project:    {}", project.name()))?;
    out.print(&format!("  Mode:       {}", project.template_mode()))?;
    out.print(&format!("  Datastore:  {}", project.datastore()))?;
    out.print(&format!("  Port:       {}", project.port()))?;
    let features = project.features().enabled();
    if !features.is_empty() {
        out.print(&format!("  Features:   {}", features.join(", ")))?;
    }
    out.print(&format!("  Git init:   {}", project.init_version_control()))?;
    out.print(&format!("  Location:   {}", args.output.display()))?;
    out.print("")?;
    Ok(())
}

fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
