//! End-to-end generation tests over the in-memory adapters.
//!
//! These drive the real pipeline and transactional store against
//! `MemoryFilesystem` and `ScriptedRunner`, covering the commit and rollback
//! scenarios the engine guarantees.

use std::path::Path;
use std::time::Duration;

use launchpad_adapters::{MemoryFilesystem, ScriptedRunner, resolve_artifacts};
use launchpad_core::{
    application::{
        ApplicationError, Filesystem, GenerationPipeline, PipelineOptions,
    },
    domain::{Datastore, FeatureSet, ProjectConfig, TemplateMode},
    error::LaunchpadError,
};

fn minimal_config() -> ProjectConfig {
    ProjectConfig::builder("demo")
        .template_mode(TemplateMode::ApiOnly)
        .datastore(Datastore::None)
        .port(3000)
        .build()
        .unwrap()
}

fn pipeline(fs: &MemoryFilesystem, runner: &ScriptedRunner) -> GenerationPipeline {
    GenerationPipeline::new(
        Box::new(fs.clone()),
        Box::new(runner.clone()),
        PipelineOptions {
            install_timeout: Duration::from_secs(10),
            ..PipelineOptions::default()
        },
    )
}

// ── Scenario: successful minimal run ──────────────────────────────────────────

#[test]
fn minimal_run_commits_skeleton_and_artifacts() {
    let fs = MemoryFilesystem::new();
    fs.seed_dir("out");
    let runner = ScriptedRunner::new();

    let config = minimal_config();
    let artifacts = resolve_artifacts(&config).unwrap();
    let report = pipeline(&fs, &runner)
        .generate(&config, &artifacts, Path::new("out"))
        .unwrap();

    assert_eq!(report.root, Path::new("out/demo"));
    assert!(report.warnings.is_empty());

    // Fixed skeleton
    for dir in [
        "out/demo/source/services",
        "out/demo/source/routes",
        "out/demo/source/middleware",
        "out/demo/source/utilities",
        "out/demo/source/config",
        "out/demo/assets/styles",
        "out/demo/assets/scripts",
        "out/demo/assets/media",
        "out/demo/assets/uploads",
        "out/demo/tests",
    ] {
        assert!(fs.exists(Path::new(dir)), "missing {dir}");
    }

    // Top-level files
    for file in [
        "out/demo/.env",
        "out/demo/.env.example",
        "out/demo/.gitignore",
        "out/demo/README.md",
        "out/demo/package.json",
        "out/demo/source/server.js",
        "out/demo/source/app.js",
    ] {
        assert!(fs.exists(Path::new(file)), "missing {file}");
    }

    // datastore: none → no datastore config file
    assert!(!fs.exists(Path::new("out/demo/source/config/datastore.js")));

    // Two installs (runtime + dev), no git.
    let calls = runner.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| c.program == "npm"));
    assert!(calls.iter().all(|c| c.working_dir == Path::new("out/demo")));
}

// ── Scenario: forced install failure ──────────────────────────────────────────

#[test]
fn install_failure_leaves_no_trace() {
    let fs = MemoryFilesystem::new();
    fs.seed_dir("out");

    let runner = ScriptedRunner::new();
    runner.push_err(ApplicationError::InstallFailed {
        command: "npm install".into(),
        exit_code: Some(1),
        stderr: "npm ERR! network timeout".into(),
    });

    let config = minimal_config();
    let artifacts = resolve_artifacts(&config).unwrap();
    let err = pipeline(&fs, &runner)
        .generate(&config, &artifacts, Path::new("out"))
        .unwrap_err();

    assert!(matches!(
        err,
        LaunchpadError::Application(ApplicationError::InstallFailed { .. })
    ));

    // demo/ does not exist afterward; only the seeded output dir survives.
    assert!(!fs.exists(Path::new("out/demo")));
    assert_eq!(fs.list_files(), Vec::<std::path::PathBuf>::new());
    assert_eq!(fs.list_dirs(), vec![std::path::PathBuf::from("out")]);

    // The dev install was short-circuited by the runtime failure.
    assert_eq!(runner.calls().len(), 1);
}

#[test]
fn dev_install_failure_also_rolls_back() {
    let fs = MemoryFilesystem::new();
    fs.seed_dir("out");

    let runner = ScriptedRunner::new();
    runner.push_ok(); // runtime install
    runner.push_err(ApplicationError::InstallTimeout {
        command: "npm install --save-dev".into(),
        timeout: Duration::from_secs(10),
    });

    let config = minimal_config();
    let artifacts = resolve_artifacts(&config).unwrap();
    let err = pipeline(&fs, &runner)
        .generate(&config, &artifacts, Path::new("out"))
        .unwrap_err();

    assert!(matches!(
        err,
        LaunchpadError::Application(ApplicationError::InstallTimeout { .. })
    ));
    assert!(!fs.exists(Path::new("out/demo")));
}

// ── Scenario: write failure mid-artifacts ─────────────────────────────────────

#[test]
fn artifact_write_failure_rolls_back_earlier_writes() {
    let fs = MemoryFilesystem::new();
    fs.seed_dir("out");
    fs.fail_writes_on("out/demo/package.json");

    let runner = ScriptedRunner::new();
    let config = minimal_config();
    let artifacts = resolve_artifacts(&config).unwrap();

    let err = pipeline(&fs, &runner)
        .generate(&config, &artifacts, Path::new("out"))
        .unwrap_err();

    assert!(matches!(
        err,
        LaunchpadError::Application(ApplicationError::FileWrite { .. })
    ));
    // Artifacts written before the failure are gone too.
    assert!(!fs.exists(Path::new("out/demo/.env")));
    assert!(!fs.exists(Path::new("out/demo")));
    // Install never ran.
    assert!(runner.calls().is_empty());
}

// ── Scenario: post-hook failure only ──────────────────────────────────────────

#[test]
fn git_init_failure_is_a_warning_not_a_rollback() {
    let fs = MemoryFilesystem::new();
    fs.seed_dir("out");

    let runner = ScriptedRunner::new();
    runner.push_ok(); // runtime install
    runner.push_ok(); // dev install
    runner.push_err(ApplicationError::Spawn {
        command: "git init".into(),
        reason: "No such file or directory".into(),
    });

    let config = ProjectConfig::builder("demo")
        .init_version_control(true)
        .build()
        .unwrap();
    let artifacts = resolve_artifacts(&config).unwrap();

    let report = pipeline(&fs, &runner)
        .generate(&config, &artifacts, Path::new("out"))
        .unwrap();

    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("git init"));
    // Fully populated and committed.
    assert!(fs.exists(Path::new("out/demo/package.json")));
    assert!(fs.exists(Path::new("out/demo/source/services")));

    // git ran in the project root with the install cwd.
    let calls = runner.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[2].program, "git");
    assert_eq!(calls[2].working_dir, Path::new("out/demo"));
}

// ── Existing target root ──────────────────────────────────────────────────────

#[test]
fn existing_root_is_refused_and_untouched() {
    let fs = MemoryFilesystem::new();
    fs.seed_dir("out/demo");
    fs.seed_file("out/demo/precious.txt", "keep me");

    let runner = ScriptedRunner::new();
    let config = minimal_config();
    let artifacts = resolve_artifacts(&config).unwrap();

    let err = pipeline(&fs, &runner)
        .generate(&config, &artifacts, Path::new("out"))
        .unwrap_err();

    // The engine will not adopt a directory it did not create.
    assert!(matches!(
        err,
        LaunchpadError::Application(ApplicationError::ProjectExists { .. })
    ));
    assert!(fs.exists(Path::new("out/demo/precious.txt")));
    assert!(runner.calls().is_empty());
}

// ── Full-feature configuration ────────────────────────────────────────────────

#[test]
fn full_feature_run_materializes_everything() {
    let fs = MemoryFilesystem::new();
    fs.seed_dir("out");
    let runner = ScriptedRunner::new();

    let config = ProjectConfig::builder("kitchen-sink")
        .template_mode(TemplateMode::DynamicTemplate)
        .datastore(Datastore::Postgres)
        .features(FeatureSet {
            authentication: true,
            linting: true,
            testing: true,
            containerization: true,
            api_docs: true,
        })
        .port(8080)
        .init_version_control(true)
        .build()
        .unwrap();
    let artifacts = resolve_artifacts(&config).unwrap();

    let report = pipeline(&fs, &runner)
        .generate(&config, &artifacts, Path::new("out"))
        .unwrap();

    assert!(report.warnings.is_empty());
    assert_eq!(report.files_written, artifacts.len());

    for path in [
        "out/kitchen-sink/views/partials",
        "out/kitchen-sink/views/index.ejs",
        "out/kitchen-sink/source/config/datastore.js",
        "out/kitchen-sink/source/middleware/auth.js",
        "out/kitchen-sink/Dockerfile",
        "out/kitchen-sink/tests/app.test.js",
    ] {
        assert!(fs.exists(Path::new(path)), "missing {path}");
    }

    // runtime install, dev install, git init
    assert_eq!(runner.calls().len(), 3);
}
