//! `buildopts value` command
//!
//! Prints the current value of one option; directory and file options are
//! resolved against their project directory.

use anyhow::Result;

use buildopts::core::OptionType;

use crate::cli::{GlobalArgs, ValueArgs};
use crate::commands::configure_build;

pub fn execute(args: ValueArgs, global: &GlobalArgs) -> Result<()> {
    let (build, _) = configure_build(global)?;
    let option = build.find_option(&args.name)?;

    let value = match option.option_type() {
        OptionType::String => option.as_string_provider().try_get()?,
        OptionType::Boolean => option
            .as_boolean_provider()?
            .try_get()?
            .map(|b| b.to_string()),
        OptionType::Integer => option.as_int_provider()?.try_get()?.map(|i| i.to_string()),
        OptionType::Directory => option
            .as_dir_provider()?
            .try_get()?
            .map(|p| p.display().to_string()),
        OptionType::File => option
            .as_file_provider()?
            .try_get()?
            .map(|p| p.display().to_string()),
    };

    match value {
        Some(value) if args.source => println!("{} ({})", value, option.source()?),
        Some(value) => println!("{}", value),
        None => tracing::info!("`{}` has no value", option.name()),
    }

    Ok(())
}
