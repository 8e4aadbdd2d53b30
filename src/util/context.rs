//! Global context for buildopts operations.
//!
//! Provides centralized access to the working directory, config paths,
//! and output settings.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::core::{ManifestError, MANIFEST_NAME};
use crate::util::config::{self, Config};
use crate::util::shell::ColorChoice;

/// Project directories for buildopts
static PROJECT_DIRS: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("", "", "buildopts"));

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Global config directory, if one can be determined
    config_dir: Option<PathBuf>,

    /// Color mode from the command line
    color: Option<ColorChoice>,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        let config_dir = PROJECT_DIRS
            .as_ref()
            .map(|dirs| dirs.config_dir().to_path_buf());

        GlobalContext {
            cwd,
            config_dir,
            color: None,
        }
    }

    /// Override the global config directory.
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(dir.into());
        self
    }

    /// Set the color mode requested on the command line.
    pub fn set_color(&mut self, color: ColorChoice) {
        self.color = Some(color);
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config_dir.as_ref().map(|dir| dir.join("config.toml"))
    }

    /// Effective color mode: command line first, then config, then auto.
    pub fn color(&self, config: &Config) -> ColorChoice {
        self.color.or_else(|| config.color()).unwrap_or_default()
    }

    /// Load the merged global and project configuration for a project root.
    pub fn load_config(&self, project_root: &Path) -> Config {
        let global = self.config_path();
        config::load_config(global.as_deref(), &config::project_config_path(project_root))
    }

    /// Find buildopts.toml starting from cwd and searching upward.
    pub fn find_manifest(&self) -> Result<PathBuf, ManifestError> {
        let mut current = self.cwd.clone();
        loop {
            let candidate = current.join(MANIFEST_NAME);
            if candidate.is_file() {
                return Ok(candidate);
            }
            if !current.pop() {
                return Err(ManifestError::NotFound {
                    dir: self.cwd.clone(),
                });
            }
        }
    }

    /// Find the root project directory (the directory containing buildopts.toml).
    pub fn find_project_root(&self) -> Result<PathBuf, ManifestError> {
        let manifest = self.find_manifest()?;
        Ok(manifest
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.cwd.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_manifest() {
        let tmp = TempDir::new().unwrap();
        let manifest = tmp.path().join(MANIFEST_NAME);
        std::fs::write(&manifest, "").unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());
        assert_eq!(ctx.find_manifest().ok(), Some(manifest));
        assert_eq!(ctx.find_project_root().ok(), Some(tmp.path().to_path_buf()));
    }

    #[test]
    fn test_find_manifest_upward() {
        let tmp = TempDir::new().unwrap();
        let manifest = tmp.path().join(MANIFEST_NAME);
        std::fs::write(&manifest, "").unwrap();
        let nested = tmp.path().join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();

        let ctx = GlobalContext::with_cwd(nested);
        assert_eq!(ctx.find_manifest().ok(), Some(manifest));
    }

    #[test]
    fn test_find_manifest_missing() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());
        assert!(matches!(
            ctx.find_manifest(),
            Err(ManifestError::NotFound { .. })
        ));
    }

    #[test]
    fn test_color_precedence() {
        let mut config = Config::default();
        config.report.color = Some("always".to_string());

        let mut ctx = GlobalContext::with_cwd(PathBuf::from("/"));
        assert_eq!(ctx.color(&Config::default()), ColorChoice::Auto);
        assert_eq!(ctx.color(&config), ColorChoice::Always);

        ctx.set_color(ColorChoice::Never);
        assert_eq!(ctx.color(&config), ColorChoice::Never);
    }

    #[test]
    fn test_load_config_with_config_dir() {
        let tmp = TempDir::new().unwrap();
        let global_dir = tmp.path().join("global");
        std::fs::create_dir_all(&global_dir).unwrap();
        std::fs::write(
            global_dir.join("config.toml"),
            "[sources]\nenv-prefix = \"G_\"\n",
        )
        .unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).with_config_dir(&global_dir);
        let config = ctx.load_config(tmp.path());
        assert_eq!(config.env_prefix(), "G_");
    }
}
