//! Configuration file support for buildopts.
//!
//! Two configuration file locations are read:
//! - Global: the user config directory, e.g. `~/.config/buildopts/config.toml`
//! - Project: `.buildopts/config.toml` next to the root manifest
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::sources::{BUILD_OPTIONS_FILE, LOCAL_BUILD_OPTIONS_FILE};
use crate::util::shell::ColorChoice;

/// Environment variable prefix used unless configured otherwise.
pub const DEFAULT_ENV_PREFIX: &str = "BUILDOPTS_";

/// buildopts configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Report settings
    pub report: ReportConfig,

    /// Value source settings
    pub sources: SourcesConfig,
}

/// Report-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Color mode (auto, always, never)
    pub color: Option<String>,
}

/// Value source configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SourcesConfig {
    /// Prefix prepended to environment variable names; `""` disables it
    pub env_prefix: Option<String>,

    /// Shared options file name, relative to the root project
    pub options_file: Option<String>,

    /// Local options file name, relative to the root project
    pub local_options_file: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.report.color.is_some() {
            self.report.color = other.report.color;
        }

        if other.sources.env_prefix.is_some() {
            self.sources.env_prefix = other.sources.env_prefix;
        }
        if other.sources.options_file.is_some() {
            self.sources.options_file = other.sources.options_file;
        }
        if other.sources.local_options_file.is_some() {
            self.sources.local_options_file = other.sources.local_options_file;
        }
    }

    /// Parse the color mode from config string.
    pub fn color(&self) -> Option<ColorChoice> {
        self.report.color.as_ref().and_then(|s| s.parse().ok())
    }

    /// Environment variable prefix, `BUILDOPTS_` when unset.
    pub fn env_prefix(&self) -> &str {
        self.sources
            .env_prefix
            .as_deref()
            .unwrap_or(DEFAULT_ENV_PREFIX)
    }

    /// Shared options file name.
    pub fn options_file(&self) -> &str {
        self.sources
            .options_file
            .as_deref()
            .unwrap_or(BUILD_OPTIONS_FILE)
    }

    /// Local options file name.
    pub fn local_options_file(&self) -> &str {
        self.sources
            .local_options_file
            .as_deref()
            .unwrap_or(LOCAL_BUILD_OPTIONS_FILE)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.buildopts/config.toml)
/// 2. Global config
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            config.merge(Config::load_or_default(global_path));
        }
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the project config path (.buildopts/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".buildopts").join("config.toml")
}
