//! Full daily run: every enabled country, then the full feed

use super::shared::{print_aggregate_stats, print_parse_stats};
use crate::config::MnpConfig;
use crate::pipeline::{CountryOutcome, Pipeline, RunStats};
use anyhow::{Context, Result, bail};
use colored::*;
use tracing::info;

pub fn run_pipeline(config: MnpConfig) -> Result<()> {
    info!(
        "Enabled countries: {}",
        config
            .enabled_countries()
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let stats = Pipeline::new(config)
        .run()
        .context("Failed to build the full feed")?;

    print_run_summary(&stats);

    let failed = stats.countries_failed();
    if failed > 0 {
        bail!("{} of {} countries failed", failed, stats.outcomes.len());
    }
    Ok(())
}

fn print_run_summary(stats: &RunStats) {
    println!("\n{}", "MNP normalization complete".bright_green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    for (country, outcome) in &stats.outcomes {
        match outcome {
            CountryOutcome::Saved {
                source,
                stats: parse_stats,
                files,
            } => {
                println!(
                    "{} {} ({})",
                    "✓".bright_green(),
                    country.to_string().bright_cyan(),
                    source.display()
                );
                print_parse_stats(parse_stats);
                println!("   • HLR3 file: {}", files.hlr3_path.display());
            }
            CountryOutcome::Failed(error) => {
                println!(
                    "{} {}: {}",
                    "✗".bright_red(),
                    country.to_string().bright_cyan(),
                    error
                );
            }
        }
    }

    println!();
    print_aggregate_stats(&stats.aggregate);
    println!(
        "   • Processing time: {:.2}s",
        stats.elapsed.as_secs_f64()
    );
}
