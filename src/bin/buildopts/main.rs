//! buildopts CLI - typed, overridable build options

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use buildopts::core::{ManifestError, OptionError};
use buildopts::util::diagnostic::{self, suggestions, Diagnostic};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        report_error(&e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.global.verbose {
        EnvFilter::new("buildopts=debug")
    } else {
        EnvFilter::new("buildopts=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Report(args) => commands::report::execute(args, &cli.global),
        Commands::Value(args) => commands::value::execute(args, &cli.global),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

fn report_error(err: &anyhow::Error) {
    let color = buildopts::util::ColorChoice::Auto.use_color();

    if let Some(option_err) = err.downcast_ref::<OptionError>() {
        let mut diag = option_err.to_diagnostic();
        let outer = format!("{:#}", err);
        let inner = option_err.to_string();
        if let Some(prefix) = outer.strip_suffix(&inner) {
            let prefix = prefix.trim_end_matches(": ");
            if !prefix.is_empty() {
                diag = diag.with_context(prefix.to_string());
            }
        }
        diagnostic::emit(&diag, color);
    } else if let Some(ManifestError::NotFound { .. }) = err.downcast_ref::<ManifestError>() {
        let diag = Diagnostic::error(err.to_string()).with_suggestion(suggestions::NO_MANIFEST);
        diagnostic::emit(&diag, color);
    } else {
        eprintln!("error: {:#}", err);
    }
}
