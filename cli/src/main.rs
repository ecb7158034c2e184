use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use league_cli::{Cli, Exit, UreqTransport};
use league_core::LeagueApi;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(exit) => ExitCode::from(exit.code()),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(Exit::Failure.code())
        }
    }
}

fn run() -> anyhow::Result<Exit> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let api = LeagueApi::new(&cli.base_url, UreqTransport::new());
    let mut stdout = std::io::stdout().lock();
    league_cli::run(&cli, &api, &mut stdout)
        .with_context(|| format!("command failed against {}", cli.base_url))
}
