//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Hallador: generate page-object classes and locator reports from HTML
#[derive(Parser, Debug)]
#[command(name = "hallador")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze an HTML page and emit code or a locator report
    Generate(GenerateArgs),
}

/// Arguments for the generate command
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// HTML file to analyze
    #[arg(short, long, conflicts_with = "stdin")]
    pub input: Option<PathBuf>,

    /// Read HTML from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Class name for the generated page object (derived from the input
    /// file name when omitted)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Target language (typescript, java, python; unknown values fall back
    /// to typescript)
    #[arg(short, long, default_value = "typescript")]
    pub lang: String,

    /// Output mode
    #[arg(short, long, value_enum, default_value = "code")]
    pub mode: Mode,

    /// Directory to write the generated class file into (code mode only;
    /// prints to stdout when omitted)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// What to print or write
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Full page-object class source
    Code,
    /// Entry list as pretty-printed JSON
    Json,
    /// Plain-text locator report
    Locators,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_parses_defaults() {
        let cli = Cli::parse_from(["hallador", "generate", "--stdin"]);
        let Commands::Generate(args) = cli.command;
        assert!(args.stdin);
        assert_eq!(args.lang, "typescript");
        assert_eq!(args.mode, Mode::Code);
        assert!(args.input.is_none());
        assert!(args.out.is_none());
    }

    #[test]
    fn input_and_stdin_conflict() {
        let res = Cli::try_parse_from([
            "hallador", "generate", "--stdin", "--input", "page.html",
        ]);
        assert!(res.is_err());
    }
}
