use anyhow::Result;
use clap::Parser;
use cablegen::cli::{AppContext, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        dry_run: cli.dry_run,
    };

    match cli.command {
        Commands::Convert(args) => cablegen::convert_run(args, &ctx),
        Commands::Layouts(args) => cablegen::infra::layout::list(args, &ctx),
        Commands::Init(args) => cablegen::infra::config::init(args, &ctx),
        Commands::Completions(args) => cablegen::completion::run(args),
    }
}
