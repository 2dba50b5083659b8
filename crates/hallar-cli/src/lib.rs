//! Hallador CLI library.
//!
//! Thin adapter over the `hallar` engine and `hallar-codegen` emitter:
//! argument parsing, input reading, and output-mode dispatch.

#![warn(missing_docs)]

mod cli;
mod commands;
mod error;

pub use cli::{Cli, Commands, GenerateArgs, Mode};
pub use commands::run_generate;
pub use error::{CliError, CliResult};

use tracing_subscriber::EnvFilter;

/// Initialize tracing from verbosity flags; `RUST_LOG` wins when set.
pub fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
