//! sanitree CLI
//!
//! Whitelist-based HTML tree sanitizer.

mod cli;
mod commands;
mod input;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::{OutputFormat, run_init, run_sanitize};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Sanitize {
            input,
            pretty,
            outline,
        } => {
            let format = if *outline {
                OutputFormat::Outline
            } else if *pretty {
                OutputFormat::PrettyJson
            } else {
                OutputFormat::Json
            };
            run_sanitize(cli.config.as_deref(), input, format)
        }
        Commands::Init { force } => run_init(*force),
    }
}
