//! Command implementations for the MNP normalizer CLI
//!
//! Each command loads configuration, sets up logging and reports its own
//! summary on stdout. Errors are returned to `main`, which prints them and
//! exits non-zero.

pub mod aggregate;
pub mod parse;
pub mod run;
pub mod shared;

use crate::cli::args::{Args, Commands};
use anyhow::{Result, bail};

/// Dispatch to the subcommand handler
pub fn run(args: Args) -> Result<()> {
    let Some(command) = args.command.clone() else {
        bail!("No command given");
    };

    let config = shared::load_configuration(&args)?;
    let _guard = shared::setup_logging(&args, &config.logging)?;

    match command {
        Commands::Run => run::run_pipeline(config),
        Commands::Parse(parse_args) => parse::run_parse(parse_args, config),
        Commands::Aggregate => aggregate::run_aggregate(config),
    }
}
