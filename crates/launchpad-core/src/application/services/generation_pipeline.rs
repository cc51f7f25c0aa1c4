//! Generation Pipeline - main application orchestrator.
//!
//! This service coordinates the entire generation workflow:
//! 1. Create the directory skeleton
//! 2. Materialize file artifacts
//! 3. Install dependencies via the package manager
//! 4. Run post-generation hooks (version-control init)
//!
//! Stages 1–3 are fatal: any failure triggers a full ledger rollback and the
//! causal error is re-raised. Stage 4 is advisory by default: the project is
//! already complete and usable, so a hook failure is reported as a warning.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRequest, CommandRunner, Filesystem},
        store::{EntryKind, TransactionalFileStore},
    },
    domain::{FileArtifact, ProjectConfig, directory_skeleton, select_packages},
    error::LaunchpadResult,
};

// ── Options ───────────────────────────────────────────────────────────────────

/// Whether a post-hook failure aborts the run.
///
/// The fatal/advisory boundary for hooks is a policy choice, not a law;
/// stages 1–3 are always fatal regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookPolicy {
    /// Report the failure as a warning; the generated project stands.
    #[default]
    Advisory,
    /// Treat the failure like a stage failure: roll back and re-raise.
    Fatal,
}

/// Tunables for one pipeline instance.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Package manager executable, e.g. `npm`.
    pub package_manager: String,
    /// Wall-clock budget for each install invocation.
    pub install_timeout: Duration,
    /// Wall-clock budget for post-generation hooks.
    pub hook_timeout: Duration,
    pub hook_policy: HookPolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            package_manager: "npm".into(),
            install_timeout: Duration::from_secs(300),
            hook_timeout: Duration::from_secs(30),
            hook_policy: HookPolicy::default(),
        }
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

/// What a successful run produced.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub root: PathBuf,
    pub directories_created: usize,
    pub files_written: usize,
    /// Advisory failures (post-hooks) that did not abort the run.
    pub warnings: Vec<String>,
}

// ── Install request ───────────────────────────────────────────────────────────

/// One package-manager invocation: which packages, dev or runtime, where.
/// Ephemeral — lowered to a [`CommandRequest`] and dropped.
struct InstallRequest<'a> {
    packages: &'a [&'static str],
    dev: bool,
    project_root: &'a Path,
    timeout: Duration,
}

impl InstallRequest<'_> {
    fn to_command(&self, package_manager: &str) -> CommandRequest {
        let mut args: Vec<String> = vec!["install".into()];
        if self.dev {
            args.push("--save-dev".into());
        }
        args.extend(self.packages.iter().map(|p| (*p).to_string()));
        CommandRequest::new(package_manager, args, self.project_root, self.timeout)
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// Sequences the four generation stages with all-or-nothing semantics.
pub struct GenerationPipeline {
    filesystem: Box<dyn Filesystem>,
    runner: Box<dyn CommandRunner>,
    options: PipelineOptions,
}

impl GenerationPipeline {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        runner: Box<dyn CommandRunner>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            filesystem,
            runner,
            options,
        }
    }

    /// Generate a project under `output_dir`.
    ///
    /// On success the tree gains exactly the skeleton plus artifacts (plus
    /// whatever the package manager wrote). On stage 1–3 failure every
    /// ledgered creation is rolled back and the causal error is returned;
    /// rollback problems are logged but never replace it.
    #[instrument(
        skip_all,
        fields(
            project = %config.name(),
            run_id = %Uuid::new_v4(),
            output_dir = %output_dir.display()
        )
    )]
    pub fn generate(
        &self,
        config: &ProjectConfig,
        artifacts: &[FileArtifact],
        output_dir: &Path,
    ) -> LaunchpadResult<GenerationReport> {
        let root = output_dir.join(config.name().as_str());

        // Retrying against a half-removed or foreign directory would break
        // the rollback guarantee; refuse anything that already exists.
        if self.filesystem.exists(&root) {
            return Err(ApplicationError::ProjectExists { path: root }.into());
        }

        let mut store = TransactionalFileStore::new(self.filesystem.as_ref());

        if let Err(err) = self.run_fatal_stages(&mut store, config, artifacts, &root) {
            self.unwind(&mut store);
            return Err(err);
        }

        let warnings = match self.run_post_hooks(config, &root) {
            Ok(warnings) => warnings,
            Err(err) => {
                // Only reachable under HookPolicy::Fatal.
                self.unwind(&mut store);
                return Err(err);
            }
        };

        let report = GenerationReport {
            root,
            directories_created: store.ledger().count_of(EntryKind::Directory),
            files_written: store.ledger().count_of(EntryKind::File),
            warnings,
        };

        info!(
            directories = report.directories_created,
            files = report.files_written,
            "generation committed"
        );
        Ok(report)
    }

    // ── Stages ────────────────────────────────────────────────────────────────

    fn run_fatal_stages(
        &self,
        store: &mut TransactionalFileStore<'_>,
        config: &ProjectConfig,
        artifacts: &[FileArtifact],
        root: &Path,
    ) -> LaunchpadResult<()> {
        self.create_structure(store, config, root)?;
        self.write_artifacts(store, artifacts, root)?;
        self.install_dependencies(config, root)?;
        Ok(())
    }

    /// Stage 1: the fixed directory skeleton, parents before children.
    #[instrument(skip_all)]
    fn create_structure(
        &self,
        store: &mut TransactionalFileStore<'_>,
        config: &ProjectConfig,
        root: &Path,
    ) -> LaunchpadResult<()> {
        store.create_directory(root)?;
        for dir in directory_skeleton(config) {
            store.create_directory(&root.join(dir.as_path()))?;
        }
        info!(directories = store.ledger().len(), "structure created");
        Ok(())
    }

    /// Stage 2: materialize artifacts in the order supplied.
    #[instrument(skip_all, fields(count = artifacts.len()))]
    fn write_artifacts(
        &self,
        store: &mut TransactionalFileStore<'_>,
        artifacts: &[FileArtifact],
        root: &Path,
    ) -> LaunchpadResult<()> {
        for artifact in artifacts {
            // Destinations are SafePath by construction, so joining cannot
            // escape the root.
            let path = root.join(artifact.destination.as_path());
            store.write_file(&path, &artifact.content, artifact.permissions)?;
        }
        info!("artifacts written");
        Ok(())
    }

    /// Stage 3: one install invocation per non-empty package list, runtime
    /// first. Sequential; the first failure short-circuits the second.
    #[instrument(skip_all)]
    fn install_dependencies(&self, config: &ProjectConfig, root: &Path) -> LaunchpadResult<()> {
        let selection = select_packages(config);

        for (packages, dev) in [
            (selection.runtime.as_slice(), false),
            (selection.development.as_slice(), true),
        ] {
            if packages.is_empty() {
                continue;
            }
            let request = InstallRequest {
                packages,
                dev,
                project_root: root,
                timeout: self.options.install_timeout,
            }
            .to_command(&self.options.package_manager);

            info!(command = %request.display_line(), dev, "installing dependencies");
            self.runner.run(&request)?;
        }
        Ok(())
    }

    /// Stage 4: post-generation hooks. Currently one: `git init`.
    fn run_post_hooks(&self, config: &ProjectConfig, root: &Path) -> LaunchpadResult<Vec<String>> {
        let mut warnings = Vec::new();

        if config.init_version_control() {
            let request = CommandRequest::new(
                "git",
                ["init"],
                root,
                self.options.hook_timeout,
            );
            match self.runner.run(&request) {
                Ok(_) => info!("git repository initialized"),
                Err(err) => match self.options.hook_policy {
                    HookPolicy::Advisory => {
                        warn!(error = %err, "post-generation hook failed; project is still usable");
                        warnings.push(format!("git init failed: {err}"));
                    }
                    HookPolicy::Fatal => return Err(err.into()),
                },
            }
        }

        Ok(warnings)
    }

    /// Roll back and log; the causal error stays with the caller.
    fn unwind(&self, store: &mut TransactionalFileStore<'_>) {
        warn!("stage failed, rolling back");
        let report = store.rollback();
        if report.is_clean() {
            info!(entries = report.attempted(), "rollback complete");
        } else {
            tracing::error!(
                leftover = report.failures().len(),
                "rollback incomplete; manual cleanup required"
            );
            for failure in report.failures() {
                tracing::error!(
                    path = %failure.path.display(),
                    reason = %failure.reason,
                    "leftover path"
                );
            }
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{CommandOutput, MockCommandRunner};
    use crate::application::testing::TestFilesystem;
    use crate::domain::{Datastore, FeatureSet, TemplateMode};
    use crate::error::LaunchpadError;

    fn minimal_config() -> ProjectConfig {
        ProjectConfig::builder("demo")
            .template_mode(TemplateMode::ApiOnly)
            .datastore(Datastore::None)
            .port(3000)
            .build()
            .unwrap()
    }

    fn ok_runner() -> MockCommandRunner {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .returning(|_| Ok(CommandOutput::default()));
        runner
    }

    fn pipeline(fs: &TestFilesystem, runner: MockCommandRunner) -> GenerationPipeline {
        GenerationPipeline::new(
            Box::new(fs.clone()),
            Box::new(runner),
            PipelineOptions::default(),
        )
    }

    // ── success path ──────────────────────────────────────────────────────────

    #[test]
    fn minimal_run_creates_skeleton() {
        let fs = TestFilesystem::new();
        fs.seed_dir("out");

        let report = pipeline(&fs, ok_runner())
            .generate(&minimal_config(), &[], Path::new("out"))
            .unwrap();

        assert_eq!(report.root, Path::new("out/demo"));
        assert!(report.warnings.is_empty());
        assert!(fs.has_dir("out/demo"));
        assert!(fs.has_dir("out/demo/source/services"));
        assert!(fs.has_dir("out/demo/assets/uploads"));
        assert!(fs.has_dir("out/demo/tests"));
        // api-only mode has no view folders
        assert!(!fs.has_dir("out/demo/views"));
    }

    #[test]
    fn install_invocations_are_runtime_then_dev() {
        use std::sync::{Arc, Mutex};

        let fs = TestFilesystem::new();
        fs.seed_dir("out");

        let seen: Arc<Mutex<Vec<Vec<String>>>> = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&seen);

        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(move |req| {
            assert_eq!(req.program, "npm");
            assert_eq!(req.working_dir, Path::new("out/demo"));
            recorder.lock().unwrap().push(req.args.clone());
            Ok(CommandOutput::default())
        });

        pipeline(&fs, runner)
            .generate(&minimal_config(), &[], Path::new("out"))
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(!seen[0].contains(&"--save-dev".to_string()));
        assert!(seen[0].contains(&"express".to_string()));
        assert_eq!(seen[1][..2], ["install".to_string(), "--save-dev".to_string()]);
        assert!(seen[1].contains(&"nodemon".to_string()));
    }

    #[test]
    fn artifacts_are_materialized() {
        let fs = TestFilesystem::new();
        fs.seed_dir("out");

        let artifacts = vec![FileArtifact::new(
            crate::domain::PathGuard::normalize(".env").unwrap(),
            "PORT=3000\n",
        )];

        pipeline(&fs, ok_runner())
            .generate(&minimal_config(), &artifacts, Path::new("out"))
            .unwrap();

        assert_eq!(
            fs.file_content("out/demo/.env").as_deref(),
            Some(b"PORT=3000\n".as_slice())
        );
    }

    // ── failure paths ─────────────────────────────────────────────────────────

    #[test]
    fn existing_root_is_refused_untouched() {
        let fs = TestFilesystem::new();
        fs.seed_dir("out");
        fs.seed_dir("out/demo");

        let err = pipeline(&fs, ok_runner())
            .generate(&minimal_config(), &[], Path::new("out"))
            .unwrap_err();

        assert!(matches!(
            err,
            LaunchpadError::Application(ApplicationError::ProjectExists { .. })
        ));
        assert!(fs.has_dir("out/demo"));
    }

    #[test]
    fn install_failure_rolls_back_completely() {
        let fs = TestFilesystem::new();
        fs.seed_dir("out");

        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(|req| {
            Err(ApplicationError::InstallFailed {
                command: req.display_line(),
                exit_code: Some(1),
                stderr: "E404 not found".into(),
            })
        });

        let artifacts = vec![FileArtifact::new(
            crate::domain::PathGuard::normalize("README.md").unwrap(),
            "# demo\n",
        )];

        let err = pipeline(&fs, runner)
            .generate(&minimal_config(), &artifacts, Path::new("out"))
            .unwrap_err();

        assert!(matches!(
            err,
            LaunchpadError::Application(ApplicationError::InstallFailed { .. })
        ));
        // Nothing of the project survives; the seeded output dir does.
        assert!(!fs.has_dir("out/demo"));
        assert!(!fs.has_file("out/demo/README.md"));
        assert!(fs.has_dir("out"));
    }

    #[test]
    fn structure_failure_rolls_back() {
        let fs = TestFilesystem::new();
        fs.seed_dir("out");
        fs.fail_dir_on("out/demo/assets");

        let err = pipeline(&fs, ok_runner())
            .generate(&minimal_config(), &[], Path::new("out"))
            .unwrap_err();

        assert!(matches!(
            err,
            LaunchpadError::Application(ApplicationError::DirectoryCreate { .. })
        ));
        assert!(!fs.has_dir("out/demo"));
    }

    #[test]
    fn write_failure_rolls_back() {
        let fs = TestFilesystem::new();
        fs.seed_dir("out");
        fs.fail_writes_on("out/demo/.env");

        let artifacts = vec![FileArtifact::new(
            crate::domain::PathGuard::normalize(".env").unwrap(),
            "PORT=3000\n",
        )];

        let err = pipeline(&fs, ok_runner())
            .generate(&minimal_config(), &artifacts, Path::new("out"))
            .unwrap_err();

        assert!(matches!(
            err,
            LaunchpadError::Application(ApplicationError::FileWrite { .. })
        ));
        assert!(!fs.has_dir("out/demo"));
    }

    // ── post-hooks ────────────────────────────────────────────────────────────

    fn config_with_git() -> ProjectConfig {
        ProjectConfig::builder("demo")
            .init_version_control(true)
            .build()
            .unwrap()
    }

    fn runner_failing_git() -> MockCommandRunner {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(|req| {
            if req.program == "git" {
                Err(ApplicationError::Spawn {
                    command: req.display_line(),
                    reason: "No such file or directory".into(),
                })
            } else {
                Ok(CommandOutput::default())
            }
        });
        runner
    }

    #[test]
    fn hook_failure_is_advisory_by_default() {
        let fs = TestFilesystem::new();
        fs.seed_dir("out");

        let report = pipeline(&fs, runner_failing_git())
            .generate(&config_with_git(), &[], Path::new("out"))
            .unwrap();

        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("git init"));
        assert!(fs.has_dir("out/demo"));
    }

    #[test]
    fn hook_failure_rolls_back_under_fatal_policy() {
        let fs = TestFilesystem::new();
        fs.seed_dir("out");

        let pipeline = GenerationPipeline::new(
            Box::new(fs.clone()),
            Box::new(runner_failing_git()),
            PipelineOptions {
                hook_policy: HookPolicy::Fatal,
                ..PipelineOptions::default()
            },
        );

        let err = pipeline
            .generate(&config_with_git(), &[], Path::new("out"))
            .unwrap_err();

        assert!(matches!(
            err,
            LaunchpadError::Application(ApplicationError::Spawn { .. })
        ));
        assert!(!fs.has_dir("out/demo"));
    }

    #[test]
    fn no_git_flag_means_no_git_invocation() {
        let fs = TestFilesystem::new();
        fs.seed_dir("out");

        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(|req| {
            assert_ne!(req.program, "git", "git must not run without the flag");
            Ok(CommandOutput::default())
        });

        pipeline(&fs, runner)
            .generate(&minimal_config(), &[], Path::new("out"))
            .unwrap();
    }
}
