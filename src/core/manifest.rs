//! buildopts.toml manifest parsing and schema.
//!
//! The manifest declares the build options of one project, the member
//! projects of a multi-project build, and how the report groups options.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use crate::core::OptionType;
use crate::util::fs;

/// Canonical manifest file name.
pub const MANIFEST_NAME: &str = "buildopts.toml";

/// Errors found while locating or validating a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not find `{}` in `{}` or any parent directory", MANIFEST_NAME, dir.display())]
    NotFound { dir: PathBuf },

    #[error("invalid option `{name}`: {message}")]
    InvalidOption { name: String, message: String },

    #[error("invalid member `{member}`: {message}")]
    InvalidMember { member: String, message: String },

    #[error("invalid group pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A computed default supported in manifests.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ComputedDefault {
    /// Number of CPUs available to the process
    AvailableParallelism,
    /// The system temporary directory
    TempDir,
    /// The value of an environment variable, if set
    Env(String),
}

impl ComputedDefault {
    /// Whether this computed default can feed an option of `option_type`.
    pub fn supports(&self, option_type: OptionType) -> bool {
        match self {
            ComputedDefault::AvailableParallelism => {
                matches!(option_type, OptionType::Integer | OptionType::String)
            }
            ComputedDefault::TempDir => {
                matches!(option_type, OptionType::Directory | OptionType::String)
            }
            ComputedDefault::Env(_) => matches!(
                option_type,
                OptionType::String | OptionType::Directory | OptionType::File
            ),
        }
    }

    /// Evaluate the default in string form. Yields nothing when unavailable.
    pub fn evaluate(&self) -> Option<String> {
        match self {
            ComputedDefault::AvailableParallelism => std::thread::available_parallelism()
                .ok()
                .map(|n| n.get().to_string()),
            ComputedDefault::TempDir => Some(std::env::temp_dir().display().to_string()),
            ComputedDefault::Env(var) => std::env::var(var).ok(),
        }
    }
}

impl std::str::FromStr for ComputedDefault {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available-parallelism" => Ok(ComputedDefault::AvailableParallelism),
            "temp-dir" => Ok(ComputedDefault::TempDir),
            _ => match s.strip_prefix("env:") {
                Some(var) if !var.is_empty() => Ok(ComputedDefault::Env(var.to_string())),
                _ => Err(format!(
                    "invalid computed default '{}'; expected 'available-parallelism', 'temp-dir', or 'env:<NAME>'",
                    s
                )),
            },
        }
    }
}

impl TryFrom<String> for ComputedDefault {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for ComputedDefault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComputedDefault::AvailableParallelism => f.write_str("available-parallelism"),
            ComputedDefault::TempDir => f.write_str("temp-dir"),
            ComputedDefault::Env(var) => write!(f, "env:{}", var),
        }
    }
}

/// Project section of the manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSection {
    /// Member project directories, relative to this manifest.
    #[serde(default)]
    pub members: Vec<String>,
}

/// One `[[option]]` declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionDecl {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, rename = "type")]
    pub option_type: OptionType,

    /// Fixed default, a TOML scalar matching the type.
    #[serde(default)]
    pub default: Option<toml::Value>,

    /// Computed default.
    #[serde(default)]
    pub computed: Option<ComputedDefault>,
}

/// A `[[report.group]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupDecl {
    pub label: String,
    pub pattern: String,
}

/// Report section of the manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ReportSection {
    /// Label for options matching no group; empty to omit them.
    #[serde(default)]
    pub other_options: Option<String>,

    #[serde(default, rename = "group")]
    pub groups: Vec<GroupDecl>,
}

/// The parsed buildopts.toml manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub project: ProjectSection,

    #[serde(default, rename = "option")]
    pub options: Vec<OptionDecl>,

    #[serde(default)]
    pub report: ReportSection,
}

impl Manifest {
    /// Load a manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))
    }

    /// Parse and validate manifest contents.
    pub fn parse(contents: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(contents)?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<(), ManifestError> {
        let mut seen = HashSet::new();
        for member in &self.project.members {
            let invalid = |message: &str| ManifestError::InvalidMember {
                member: member.clone(),
                message: message.to_string(),
            };

            let path = Path::new(member);
            if !path
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
            {
                return Err(invalid("members must be subdirectories of the root project"));
            }

            let project_path = fs::project_path(path);
            if project_path == ":" {
                return Err(invalid("the root project cannot be its own member"));
            }
            if !seen.insert(project_path) {
                return Err(invalid("the directory is listed more than once"));
            }
        }

        for decl in &self.options {
            decl.validate()?;
        }
        Ok(())
    }
}

impl OptionDecl {
    fn invalid(&self, message: impl Into<String>) -> ManifestError {
        ManifestError::InvalidOption {
            name: self.name.clone(),
            message: message.into(),
        }
    }

    /// Check that the default fits the declared type.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.name.trim().is_empty() {
            return Err(self.invalid("the name is empty"));
        }

        if let Some(computed) = &self.computed {
            if self.default.is_some() {
                return Err(self.invalid("`default` and `computed` are mutually exclusive"));
            }
            if !computed.supports(self.option_type) {
                return Err(self.invalid(format!(
                    "computed default `{}` cannot produce a {} value",
                    computed,
                    self.option_type.as_str()
                )));
            }
        }

        if self.default.is_some() {
            match self.option_type {
                OptionType::String => {
                    self.string_default()?;
                }
                OptionType::Boolean => {
                    self.boolean_default()?;
                }
                OptionType::Integer => {
                    self.integer_default()?;
                }
                OptionType::Directory | OptionType::File => {
                    self.path_default()?;
                }
            }
        }
        Ok(())
    }

    /// The fixed default of a string option.
    pub fn string_default(&self) -> Result<Option<String>, ManifestError> {
        match &self.default {
            None => Ok(None),
            Some(toml::Value::String(s)) => Ok(Some(s.clone())),
            Some(toml::Value::Integer(i)) => Ok(Some(i.to_string())),
            Some(toml::Value::Float(f)) => Ok(Some(f.to_string())),
            Some(toml::Value::Boolean(b)) => Ok(Some(b.to_string())),
            Some(other) => Err(self.invalid(format!(
                "default must be a scalar, found {}",
                other.type_str()
            ))),
        }
    }

    /// The fixed default of a boolean option.
    pub fn boolean_default(&self) -> Result<Option<bool>, ManifestError> {
        match &self.default {
            None => Ok(None),
            Some(toml::Value::Boolean(b)) => Ok(Some(*b)),
            Some(other) => Err(self.invalid(format!(
                "default must be a boolean, found {}",
                other.type_str()
            ))),
        }
    }

    /// The fixed default of an integer option.
    pub fn integer_default(&self) -> Result<Option<i32>, ManifestError> {
        match &self.default {
            None => Ok(None),
            Some(toml::Value::Integer(i)) => i32::try_from(*i)
                .map(Some)
                .map_err(|_| self.invalid(format!("default {} is out of range", i))),
            Some(other) => Err(self.invalid(format!(
                "default must be an integer, found {}",
                other.type_str()
            ))),
        }
    }

    /// The fixed default of a directory or file option.
    pub fn path_default(&self) -> Result<Option<PathBuf>, ManifestError> {
        match &self.default {
            None => Ok(None),
            Some(toml::Value::String(s)) => Ok(Some(PathBuf::from(s))),
            Some(other) => Err(self.invalid(format!(
                "default must be a path string, found {}",
                other.type_str()
            ))),
        }
    }
}
