//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `LAUNCHPAD_*` environment variables (e.g. `LAUNCHPAD_INSTALL__TIMEOUT_SECS`)
//! 3. Config file (`--config`, or the default location if it exists)
//! 4. Built-in defaults (always present)

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Dependency installation settings.
    pub install: InstallConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    pub mode: String,
    pub datastore: String,
    pub port: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallConfig {
    /// Package manager executable invoked for dependency installation.
    pub package_manager: String,
    /// Wall-clock budget per install invocation, in seconds.
    pub timeout_secs: u64,
}

impl InstallConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults {
                mode: "api".into(),
                datastore: "none".into(),
                port: 3000,
            },
            install: InstallConfig {
                package_manager: "npm".into(),
                timeout_secs: 300,
            },
            output: OutputConfig {
                no_color: false,
                format: "human".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// The `config_file` parameter is the path the user passed via `--config`
    /// (or `None` to probe the default location).  A missing `--config` file
    /// is an error; a missing default-location file is not.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("defaults.mode", "api")?
            .set_default("defaults.datastore", "none")?
            .set_default("defaults.port", 3000_i64)?
            .set_default("install.package_manager", "npm")?
            .set_default("install.timeout_secs", 300_i64)?
            .set_default("output.no_color", false)?
            .set_default("output.format", "human")?;

        match config_file {
            Some(path) => {
                builder = builder.add_source(config::File::from(path.as_path()));
            }
            None => {
                let default_path = Self::config_path();
                if default_path.exists() {
                    builder = builder.add_source(config::File::from(default_path));
                }
            }
        }

        builder = builder
            .add_source(config::Environment::with_prefix("LAUNCHPAD").separator("__"));

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.launchpad.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "launchpad", "launchpad")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".launchpad.toml"))
    }
}
