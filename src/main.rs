// src/main.rs

use anyhow::Result;
use clap::Parser;
use repo2module::config::{FileConfig, LogLevel, RunConfig};
use repo2module::{EXIT_FAILURE, Error};
use std::process::ExitCode;
use tracing::error;

mod cli;
mod commands;

use cli::Cli;

/// Initialize the tracing subscriber; `RUST_LOG` takes precedence over
/// the configured level
fn init_logging(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.directive())),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Build the run configuration from the command line and the optional
/// config file
fn load_config(cli: Cli) -> Result<RunConfig> {
    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let log_level = cli.log_level();
    let overrides = cli.overrides();

    Ok(RunConfig::resolve(
        cli.repo_path,
        cli.modules_yaml,
        overrides,
        file,
        log_level,
    )?)
}

fn report(err: anyhow::Error) -> ExitCode {
    error!("{:#}", err);
    let code = err
        .downcast_ref::<Error>()
        .map_or(EXIT_FAILURE, Error::exit_code);
    ExitCode::from(code)
}

fn main() -> ExitCode {
    let config = match load_config(Cli::parse()) {
        Ok(config) => config,
        Err(err) => {
            // No level could be resolved; fall back to the default one
            init_logging(LogLevel::default());
            return report(err);
        }
    };
    init_logging(config.log_level);

    match commands::cmd_generate(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(err),
    }
}
