use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::infra::layout::TransceiverPolicy;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
    pub dry_run: bool,  // global --dry-run
}

#[derive(Parser)]
#[command(name = "cablegen")]
#[command(
    about = "A fast CLI for converting cable compatibility workbooks into static cable attribute tables"
)]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Run the conversion without writing the output file
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert workbook sheets into a cable attribute table
    Convert(ConvertArgs),

    /// List the built-in column layout revisions
    Layouts(LayoutsArgs),

    /// Initialize a cablegen.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Compatibility workbook (.xlsx/.xlsm)
    pub workbook: PathBuf,

    /// Sheet to convert (repeatable; defaults to the sheets in cablegen.toml)
    #[arg(short, long = "sheet", value_name = "NAME")]
    pub sheets: Vec<String>,

    /// Output header path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Column layout revision (see `cablegen layouts`)
    #[arg(long)]
    pub layout: Option<String>,

    /// Transceiver-row policy, overriding the layout's default
    #[arg(long, value_enum)]
    pub transceivers: Option<TransceiverPolicy>,

    /// Emit the run summary as single-line JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct LayoutsArgs {
    /// Machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; if omitted and --stdout not set, prints error
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}
