mod collector;
mod config;
mod executors;
mod export;
mod run;

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod run_test;

use clap::{ArgAction, Parser};
use config::AnalysisConfig;
use run::{run, Command, RunError};
use std::{path::PathBuf, process::exit};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Reconcile and compare response-time measurements of scheduling algorithms
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// analysis config (YAML)
    #[arg(short, long, default_value = "rtan.yaml")]
    config: PathBuf,

    /// raise the log level, ignored when RUST_LOG is set
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match AnalysisConfig::load(&cli.config) {
        Ok(config) => config,
        Err(error) => {
            error!(path = ?cli.config, error = ?error, "Failed to load config: {error}");
            exit(1)
        }
    };

    if config.preflight_checks() {
        error!("Preflight checks failed, see above");
        exit(1)
    }

    match run(cli.command, &config) {
        Ok(_) => {}
        Err(RunError::Integrity(error)) => {
            error!(kind = ?error.kind(), "Data integrity violated: {error}");
            exit(1)
        }
        Err(error) => {
            error!(error = ?error, "Failed to {:?}: {error}", cli.command);
            exit(1)
        }
    }
}
