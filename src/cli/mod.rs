//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod history;
pub mod pick;
pub mod reverse;
pub mod search;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter, OutputFormatter};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Pick a location by map point, search or device location
#[derive(Parser)]
#[command(name = "pinpoint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log picker activity to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a picker session and print the chosen place
    Pick(pick::PickArgs),

    /// Search for places by name or address
    Search(search::SearchArgs),

    /// Describe the place at a coordinate
    Reverse(reverse::ReverseArgs),

    /// View and manage search history
    History(history::HistoryArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Set up logging to stderr
///
/// `RUST_LOG` wins when set; otherwise warnings only, or debug output for
/// this crate with `--verbose`.
fn init_logging(verbose: bool) {
    let fallback = if verbose { "pinpoint=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Resolve a formatter by name, falling back to text
fn formatter(name: Option<&str>) -> Result<Box<dyn OutputFormatter>> {
    let name = name.unwrap_or("text");
    get_formatter(name).ok_or_else(|| Error::Config(format!("Unknown format: {}", name)))
}

/// Print output to stdout, or to a file when given
fn emit(output: &str, path: Option<&str>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, output)?;
            eprintln!("Output written to {}", path);
        }
        None => println!("{}", output.trim_end()),
    }
    Ok(())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Pick(args) => pick::run(args, Config::load()?).await,
        Commands::Search(args) => search::run(args, Config::load()?).await,
        Commands::Reverse(args) => reverse::run(args, Config::load()?).await,
        Commands::History(args) => history::run(args),
        Commands::Config(args) => config::run(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_formatter_lookup() {
        assert_eq!(formatter(None).unwrap().name(), "text");
        assert_eq!(formatter(Some("gpx")).unwrap().name(), "gpx");
        assert!(formatter(Some("yaml")).is_err());
    }

    #[test]
    fn test_parse_pick_at() {
        let cli = Cli::try_parse_from(["pinpoint", "pick", "--at", "-33.86,151.21"]).unwrap();
        match cli.command {
            Commands::Pick(args) => {
                let at = args.at.unwrap();
                assert_eq!(at.lat, -33.86);
                assert_eq!(at.lng, 151.21);
            }
            _ => panic!("expected pick"),
        }
    }

    #[test]
    fn test_parse_pick_sources_conflict() {
        assert!(Cli::try_parse_from(["pinpoint", "pick", "--here", "--search", "cafe"]).is_err());
        assert!(Cli::try_parse_from(["pinpoint", "pick", "--result", "2"]).is_err());
    }

    #[test]
    fn test_parse_reverse_negative() {
        let cli = Cli::try_parse_from(["pinpoint", "reverse", "-33.86", "151.21"]).unwrap();
        assert!(matches!(cli.command, Commands::Reverse(_)));
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["pinpoint", "history", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
