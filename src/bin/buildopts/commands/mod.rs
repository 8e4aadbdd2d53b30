//! Command implementations

pub mod completions;
pub mod report;
pub mod value;

use anyhow::{Context, Result};

use buildopts::ops::{configure, ConfigureOptions, ConfiguredBuild};
use buildopts::sources::properties::parse_assignment;
use buildopts::sources::EnvironmentVariables;
use buildopts::util::{ColorChoice, GlobalContext};

use crate::cli::GlobalArgs;

/// Locate the manifest and configure the build from the global flags.
pub fn configure_build(global: &GlobalArgs) -> Result<(ConfiguredBuild, ColorChoice)> {
    let mut ctx = match &global.directory {
        Some(dir) => {
            let dir = std::fs::canonicalize(dir)
                .with_context(|| format!("failed to enter directory: {}", dir.display()))?;
            GlobalContext::with_cwd(dir)
        }
        None => GlobalContext::new()?,
    };
    if let Some(color) = global.color {
        ctx.set_color(color);
    }

    let manifest_path = ctx.find_manifest()?;
    let root_dir = ctx.find_project_root()?;
    let config = ctx.load_config(&root_dir);
    tracing::debug!("using manifest {}", manifest_path.display());

    let opts = ConfigureOptions {
        project_properties: parse_assignments(&global.project_property)?,
        system_properties: parse_assignments(&global.system_property)?,
        env: EnvironmentVariables::capture(),
    };

    let build = configure(&manifest_path, &config, opts)?;
    Ok((build, ctx.color(&config)))
}

fn parse_assignments(values: &[String]) -> Result<Vec<(String, String)>> {
    values.iter().map(|v| parse_assignment(v)).collect()
}
