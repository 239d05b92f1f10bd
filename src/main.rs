use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rmcache::cli::Cli;
use rmcache::{output, run, Config, Resolver, RunOptions, SearchPath};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    let config = match Config::load(&cli.config).context("cannot load configuration") {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(error = format!("{error:#}"), "failed to load config");
            return Err(error);
        }
    };

    let locator = SearchPath::from_env();
    let resolver = Resolver::from_env();
    let summary = run(
        &config,
        &RunOptions {
            locator: &locator,
            resolver: &resolver,
            dry_run: cli.dry_run,
        },
    );

    output::print_summary(&summary, resolver.home());
    Ok(())
}
