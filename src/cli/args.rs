//! Command-line argument definitions for the MNP normalizer
//!
//! Global flags apply to every subcommand and may be given before or after
//! the subcommand name.

use crate::country::Country;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the MNP normalizer
///
/// Normalizes per-country mobile number portability extracts into HLR and
/// HLR3 files and aggregates them into one full feed.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mnp-normalizer",
    version,
    about = "Normalize mobile number portability extracts into HLR/HLR3 feeds",
    long_about = "Reads each enabled country's raw portability extract, normalizes it into \
                  semicolon-delimited HLR and HLR3 files, and joins the per-country HLR3 files \
                  into a single full feed for the routing loaders."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, mnp.toml in the working
    /// directory is used when present.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Process every enabled country, then rebuild the full feed
    Run,
    /// Parse a single extract file and print a summary
    Parse(ParseArgs),
    /// Rebuild the full feed from existing per-country HLR3 files
    Aggregate,
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Country whose format the file is in (georgia, latvia, kazakhstan, belarus)
    #[arg(long = "country", value_name = "NAME", value_parser = parse_country)]
    pub country: Country,

    /// Raw extract file to parse
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Persist the result to the configured HLR and HLR3 directories
    #[arg(long = "save")]
    pub save: bool,
}

fn parse_country(value: &str) -> Result<Country, String> {
    value.parse::<Country>().map_err(|e| e.to_string())
}

impl Args {
    /// Log level from the flags, `None` when the configured level applies
    pub fn get_log_level(&self) -> Option<&'static str> {
        if self.quiet {
            return Some("error");
        }
        match self.verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        let args = Args::try_parse_from([
            "mnp-normalizer",
            "parse",
            "--country",
            "KZ",
            "--input",
            "kz.csv",
            "--save",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Parse(parse)) => {
                assert_eq!(parse.country, Country::Kazakhstan);
                assert_eq!(parse.input, PathBuf::from("kz.csv"));
                assert!(parse.save);
            }
            other => panic!("Expected parse command, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_country_is_rejected() {
        let result = Args::try_parse_from([
            "mnp-normalizer",
            "parse",
            "--country",
            "atlantis",
            "--input",
            "x.csv",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            Args::try_parse_from(["mnp-normalizer", "run", "-vv", "--config", "prod.toml"]).unwrap();

        assert!(matches!(args.command, Some(Commands::Run)));
        assert_eq!(args.config_file, Some(PathBuf::from("prod.toml")));
        assert_eq!(args.get_log_level(), Some("debug"));
    }

    #[test]
    fn test_log_levels() {
        let args = Args::try_parse_from(["mnp-normalizer", "aggregate"]).unwrap();
        assert_eq!(args.get_log_level(), None);

        let args = Args::try_parse_from(["mnp-normalizer", "-q", "aggregate"]).unwrap();
        assert_eq!(args.get_log_level(), Some("error"));

        let result = Args::try_parse_from(["mnp-normalizer", "-q", "-v", "aggregate"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_subcommand() {
        let args = Args::try_parse_from(["mnp-normalizer"]).unwrap();
        assert!(args.command.is_none());
    }
}
