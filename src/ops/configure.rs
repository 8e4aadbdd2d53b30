//! Configuration of a build from its manifests.
//!
//! Loads the root manifest and its members, builds the shared source chain,
//! declares every option, and prepares the report.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::core::manifest::{ComputedDefault, OptionDecl, ReportSection};
use crate::core::{
    BuildOption, BuildOptions, Manifest, ManifestError, OptionDefault, OptionError, OptionType,
    Project, MANIFEST_NAME,
};
use crate::ops::option_report::{collect_options, OptionGroupingSpec, OptionReport};
use crate::sources::{EnvironmentVariables, OptionsFile, Properties, SourceChain};
use crate::util::Config;

/// Inputs for configuring a build.
#[derive(Debug, Clone, Default)]
pub struct ConfigureOptions {
    /// `-P name=value` overrides
    pub project_properties: Vec<(String, String)>,

    /// `-D name=value` overrides
    pub system_properties: Vec<(String, String)>,

    /// Environment snapshot to read overrides from
    pub env: EnvironmentVariables,
}

/// A configured build: one registry per project plus the report settings.
#[derive(Debug)]
pub struct ConfiguredBuild {
    manifest_path: PathBuf,
    projects: Vec<BuildOptions>,
    report: OptionReport,
}

impl ConfiguredBuild {
    /// Path of the root manifest.
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Registries of all projects, the root project first.
    pub fn projects(&self) -> &[BuildOptions] {
        &self.projects
    }

    /// Registry of the root project.
    pub fn root(&self) -> &BuildOptions {
        &self.projects[0]
    }

    /// All options of all projects, in declaration order.
    pub fn options(&self) -> Vec<Arc<BuildOption>> {
        collect_options(&self.projects)
    }

    /// The report renderer.
    pub fn report(&self) -> &OptionReport {
        &self.report
    }

    /// Render the options report.
    pub fn render_report(&self, use_color: bool) -> String {
        self.report.render_to_string(&self.options(), use_color)
    }

    /// Find an option by name, looking at the root project first.
    pub fn find_option(&self, name: &str) -> Result<Arc<BuildOption>, OptionError> {
        self.projects
            .iter()
            .find_map(|registry| registry.get_option(name).ok())
            .ok_or_else(|| {
                let mut known: Vec<String> = Vec::new();
                for option in self.projects.iter().flat_map(|r| r.options()) {
                    if !known.iter().any(|k| k == option.name()) {
                        known.push(option.name().to_string());
                    }
                }
                OptionError::UnknownOption {
                    name: name.to_string(),
                    known,
                }
            })
    }
}

/// Configure the build rooted at `manifest_path`.
pub fn configure(
    manifest_path: &Path,
    config: &Config,
    opts: ConfigureOptions,
) -> Result<ConfiguredBuild> {
    let manifest = Manifest::load(manifest_path)?;
    let root_dir = manifest_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let sources = Arc::new(source_chain(&root_dir, config, opts)?);
    tracing::debug!("value sources: {:?}", sources.kinds());

    let root = Project::root(&root_dir);
    let mut projects = vec![declare_project(root.clone(), &manifest, &sources)?];

    for member in &manifest.project.members {
        let member_manifest_path = root_dir.join(member).join(MANIFEST_NAME);
        let member_manifest = Manifest::load(&member_manifest_path)
            .with_context(|| format!("failed to load member project `{}`", member))?;

        if !member_manifest.project.members.is_empty() {
            tracing::warn!(
                "ignoring members declared by {}; only the root manifest lists members",
                member_manifest_path.display()
            );
        }

        let project = Project::member(&root_dir, Path::new(member));
        projects.push(declare_project(project, &member_manifest, &sources)?);
    }

    let report = OptionReport::new(&root)
        .with_grouping(grouping(&manifest.report)?)
        .with_file_names(config.options_file(), config.local_options_file());

    Ok(ConfiguredBuild {
        manifest_path: manifest_path.to_path_buf(),
        projects,
        report,
    })
}

fn source_chain(root_dir: &Path, config: &Config, opts: ConfigureOptions) -> Result<SourceChain> {
    let mut chain = SourceChain::new();
    chain.add(Properties::project(opts.project_properties));
    chain.add(Properties::system(opts.system_properties));
    chain.add(opts.env.with_prefix(config.env_prefix()));
    chain.add(OptionsFile::local(&root_dir.join(config.local_options_file()))?);
    chain.add(OptionsFile::shared(&root_dir.join(config.options_file()))?);
    Ok(chain)
}

fn declare_project(
    project: Project,
    manifest: &Manifest,
    sources: &Arc<SourceChain>,
) -> Result<BuildOptions> {
    let display_name = project.display_name();
    let mut registry = BuildOptions::new(project, Arc::clone(sources));

    for decl in &manifest.options {
        declare_option(&mut registry, decl)
            .with_context(|| format!("failed to configure project {}", display_name))?;
    }

    Ok(registry)
}

/// Declare one option and observe its typed value, so overrides that do not
/// fit the option type are reported during configuration.
fn declare_option(registry: &mut BuildOptions, decl: &OptionDecl) -> Result<()> {
    let name = decl.name.as_str();
    let description = decl.description.as_str();

    match decl.option_type {
        OptionType::String => {
            let default: OptionDefault<String> = match &decl.computed {
                Some(computed) => computed_default(computed, Some),
                None => decl.string_default()?.into(),
            };
            registry.add_option(name, description, default)?.try_get()?;
        }
        OptionType::Boolean => {
            let default: OptionDefault<bool> = match &decl.computed {
                Some(computed) => computed_default(computed, |s| s.parse().ok()),
                None => decl.boolean_default()?.into(),
            };
            registry
                .add_boolean_option(name, description, default)?
                .try_get()?;
        }
        OptionType::Integer => {
            let default: OptionDefault<i32> = match &decl.computed {
                Some(computed) => computed_default(computed, |s| s.parse().ok()),
                None => decl.integer_default()?.into(),
            };
            registry.add_int_option(name, description, default)?.try_get()?;
        }
        OptionType::Directory => {
            let default: OptionDefault<PathBuf> = match &decl.computed {
                Some(computed) => computed_default(computed, |s| Some(PathBuf::from(s))),
                None => decl.path_default()?.into(),
            };
            registry.add_dir_option(name, description, default)?.try_get()?;
        }
        OptionType::File => {
            let default: OptionDefault<PathBuf> = match &decl.computed {
                Some(computed) => computed_default(computed, |s| Some(PathBuf::from(s))),
                None => decl.path_default()?.into(),
            };
            registry.add_file_option(name, description, default)?.try_get()?;
        }
    }

    Ok(())
}

fn computed_default<T: 'static>(
    computed: &ComputedDefault,
    convert: fn(String) -> Option<T>,
) -> OptionDefault<T> {
    let computed = computed.clone();
    OptionDefault::computed(move || computed.evaluate().and_then(convert))
}

fn grouping(report: &ReportSection) -> Result<OptionGroupingSpec, ManifestError> {
    let mut spec = OptionGroupingSpec::new();
    for group in &report.groups {
        spec.group(&group.label, &group.pattern)
            .map_err(|source| ManifestError::InvalidPattern {
                pattern: group.pattern.clone(),
                source,
            })?;
    }

    match report.other_options.as_deref() {
        Some("") => {
            spec.omit_other_options();
        }
        Some(label) => {
            spec.other_options(label);
        }
        None => {}
    }

    Ok(spec)
}
