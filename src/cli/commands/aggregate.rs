//! Rebuild the full feed from existing HLR3 files

use super::shared::print_aggregate_stats;
use crate::aggregator::Aggregator;
use crate::config::MnpConfig;
use anyhow::{Context, Result};

pub fn run_aggregate(config: MnpConfig) -> Result<()> {
    let stats = Aggregator::new(&config.hlr3_directory, &config.full_hlr_file)
        .aggregate(&config.enabled_countries())
        .with_context(|| format!("Failed to write {}", config.full_hlr_file.display()))?;

    print_aggregate_stats(&stats);
    Ok(())
}
