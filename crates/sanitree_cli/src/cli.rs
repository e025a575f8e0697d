//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// sanitree - Whitelist-based HTML tree sanitizer
#[derive(Parser)]
#[command(name = "sanitree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sanitize a JSON document tree
    Sanitize {
        /// Input file, or `-` for stdin
        input: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long, conflicts_with = "outline")]
        pretty: bool,

        /// Print an indented outline instead of JSON
        #[arg(long)]
        outline: bool,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}
