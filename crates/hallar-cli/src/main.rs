//! Hallador: locator and page-object generation from the command line
//!
//! ## Usage
//!
//! ```bash
//! hallador generate --input page.html                # TypeScript class
//! hallador generate --input page.html --lang python  # Python class
//! hallador generate --stdin --mode locators          # report from stdin
//! hallador generate --input page.html --mode json    # machine-readable
//! ```

use clap::Parser;
use hallador::{run_generate, Cli, CliResult, Commands};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    hallador::init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Generate(args) => run_generate(&args),
    }
}
