//! `buildopts report` command

use anyhow::Result;

use crate::cli::{GlobalArgs, ReportArgs};
use crate::commands::configure_build;

pub fn execute(_args: ReportArgs, global: &GlobalArgs) -> Result<()> {
    let (build, color) = configure_build(global)?;

    print!("{}", build.render_report(color.use_color()));

    Ok(())
}
