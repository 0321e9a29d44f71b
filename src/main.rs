//! grepdeck - browse code-search results as a path tree, filtered and paged
//!
//! grepdeck provides:
//! - Loading of fetched result lists (JSON records or `rg --json`)
//! - Path tree, filtered tree and page views over one search session
//! - A scripted shell for driving a session step by step
//! - Unified output format (jsonl/json/md/raw)

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use grepdeck::cli;

fn init_tracing(cli: &cli::Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(&cli);
    cli::run(cli)
}
