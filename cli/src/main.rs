mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{footprint, index, search};
use tracing_subscriber::EnvFilter;

/// Log to stderr; `RUST_LOG` wins over the -v count.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Footprint(args) => footprint::run(&cli, args),
        Commands::Index(args) => index::run(&cli, args),
        Commands::Search(args) => search::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
