//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the pieces it needs as
//! [`ContextSettings`].
//!
//! # Resolution order (highest priority first)
//!
//! 1. Environment variables, `FORGE_` prefix, `__` between nested keys
//!    (`FORGE_INSTALL__PROBE_FLAG=--version`). Lists are space separated.
//! 2. Config file: `--config FILE`, else `config.toml` in the platform
//!    config directory (optional).
//! 3. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use forge_adapters::{generator_loader::DEFAULT_GENERATORS_DIR, project_resolver::DEFAULT_DESCRIPTOR};
use forge_core::application::ContextSettings;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub project: ProjectConfig,
    pub install: InstallConfig,
    pub generators: GeneratorsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Descriptor file name, relative to the project root.
    pub descriptor: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Prefix for running the project script, e.g. `["poetry", "run"]`.
    pub launcher: Vec<String>,
    /// Argument used to probe whether the script is installed.
    pub probe_flag: String,
    /// Command that installs a project.
    pub command: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorsConfig {
    /// Local generator directory, relative to the project root.
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            descriptor: PathBuf::from(DEFAULT_DESCRIPTOR),
        }
    }
}

impl Default for InstallConfig {
    fn default() -> Self {
        let settings = ContextSettings::default();
        Self {
            launcher: settings.launcher,
            probe_flag: settings.probe_flag,
            command: settings.install_command,
        }
    }
}

impl Default for GeneratorsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_GENERATORS_DIR),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file, and the environment.
    ///
    /// `config_file` is the path passed via `--config`; when given it must
    /// exist. Without it the default location is read if present.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to build default configuration")?;

        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::from(Self::config_path().as_path()).required(false),
        };

        let env = Environment::with_prefix("FORGE")
            .prefix_separator("_")
            .separator("__")
            .list_separator(" ")
            .with_list_parse_key("install.launcher")
            .with_list_parse_key("install.command")
            .try_parsing(true);

        let config: Self = Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(env)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.install.command.is_empty() {
            anyhow::bail!("'install.command' must not be empty");
        }
        if self.install.probe_flag.trim().is_empty() {
            anyhow::bail!("'install.probe_flag' must not be empty");
        }
        Ok(())
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.forge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("io", "forge", "forge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".forge.toml"))
    }

    /// The subset of settings the shared context needs.
    pub fn context_settings(&self) -> ContextSettings {
        ContextSettings {
            launcher: self.install.launcher.clone(),
            probe_flag: self.install.probe_flag.clone(),
            install_command: self.install.command.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_core_settings() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.context_settings(), ContextSettings::default());
        assert_eq!(cfg.project.descriptor, PathBuf::from("forge.ini"));
        assert_eq!(cfg.generators.dir, PathBuf::from("lib/generators"));
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("forge.toml");
        fs::write(
            &path,
            "[install]\nlauncher = [\"poetry\", \"run\"]\ncommand = [\"poetry\", \"install\"]\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(path.as_path())).unwrap();

        assert_eq!(cfg.install.launcher, vec!["poetry", "run"]);
        assert_eq!(cfg.install.command, vec!["poetry", "install"]);
        assert_eq!(cfg.install.probe_flag, "--help");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(AppConfig::load(Some(temp.path().join("absent.toml").as_path())).is_err());
    }

    #[test]
    fn blank_probe_flag_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("forge.toml");
        fs::write(&path, "[install]\nprobe_flag = \"  \"\n").unwrap();

        assert!(AppConfig::load(Some(path.as_path())).is_err());
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
