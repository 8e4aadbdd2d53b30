//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use buildopts::util::ColorChoice;

/// buildopts - typed, overridable build options
#[derive(Parser)]
#[command(name = "buildopts")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Color output (auto, always, never)
    #[arg(long, global = true, value_name = "WHEN", value_parser = parse_color)]
    pub color: Option<ColorChoice>,

    /// Set an option as a project property (highest precedence)
    #[arg(short = 'P', global = true, value_name = "NAME=VALUE")]
    pub project_property: Vec<String>,

    /// Set an option as a system property
    #[arg(short = 'D', global = true, value_name = "NAME=VALUE")]
    pub system_property: Vec<String>,

    /// Run as if started in this directory
    #[arg(short = 'C', long = "directory", global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

fn parse_color(s: &str) -> Result<ColorChoice, String> {
    s.parse()
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show all build options, their values and where the values come from
    Report(ReportArgs),

    /// Print the value of one build option
    Value(ValueArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ReportArgs {}

#[derive(Args)]
pub struct ValueArgs {
    /// Option name
    pub name: String,

    /// Also print the value source
    #[arg(long)]
    pub source: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
