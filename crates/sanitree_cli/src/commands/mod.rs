//! Subcommand implementations

mod init;
mod sanitize;

pub use init::run_init;
pub use sanitize::{OutputFormat, run_sanitize};
