//! Parse a single extract file

use super::shared::print_parse_stats;
use crate::cli::args::ParseArgs;
use crate::config::MnpConfig;
use crate::parsers::parser_for;
use crate::writer::{CsvResultWriter, ResultSink};
use anyhow::{Context, Result};
use colored::*;

pub fn run_parse(args: ParseArgs, config: MnpConfig) -> Result<()> {
    let parser = parser_for(args.country, &config)?;
    let result = parser
        .parse(&args.input)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    println!(
        "{} {} ({})",
        "Parsed".bright_green(),
        args.country.to_string().bright_cyan(),
        args.input.display()
    );
    print_parse_stats(&result.stats);
    println!("   • HLR records: {}", result.hlr_records.len());
    println!("   • HLR3 records: {}", result.hlr3_records.len());
    if !result.is_paired() {
        println!(
            "   {} HLR and HLR3 records are not paired",
            "⚠️".bright_yellow()
        );
    }

    if args.save {
        let writer = CsvResultWriter::new(&config.hlr_directory, &config.hlr3_directory);
        let files = writer
            .save(&result, args.country)
            .with_context(|| format!("Failed to save {} result", args.country))?;
        println!("📁 Saved {}", files.hlr_path.display());
        println!("📁 Saved {}", files.hlr3_path.display());
    }

    Ok(())
}
