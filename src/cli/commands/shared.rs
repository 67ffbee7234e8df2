//! Shared components for CLI commands
//!
//! Configuration loading, logging setup and human-readable summaries used
//! by more than one command.

use crate::aggregator::AggregateStats;
use crate::cli::args::Args;
use crate::config::{LoggingConfig, MnpConfig};
use crate::models::ParseStats;
use anyhow::{Context, Result};
use colored::*;
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;

/// Load configuration from the `--config` file or the default locations
pub fn load_configuration(args: &Args) -> Result<MnpConfig> {
    let config = MnpConfig::load(args.config_file.as_deref()).with_context(|| {
        match &args.config_file {
            Some(path) => format!("Failed to load configuration from {}", path.display()),
            None => "Failed to load configuration".to_string(),
        }
    })?;
    Ok(config)
}

/// Set up structured logging to stderr, plus a daily log file when configured.
///
/// The returned guard flushes the file writer and must be held until exit.
pub fn setup_logging(args: &Args, logging: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level().unwrap_or(logging.level.as_str());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mnp_normalizer={}", log_level)));

    let (file_layer, guard) = match &logging.directory {
        Some(directory) => {
            std::fs::create_dir_all(directory).with_context(|| {
                format!("Failed to create log directory {}", directory.display())
            })?;
            let appender = tracing_appender::rolling::daily(directory, &logging.file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(guard)
}

/// Print row statistics of one parsed file
pub fn print_parse_stats(stats: &ParseStats) {
    println!("   • Rows read: {}", stats.rows_total);
    println!(
        "   • Rows accepted: {}",
        stats.rows_accepted.to_string().bright_green()
    );
    println!("   • Rows filtered: {}", stats.rows_filtered);
    println!("   • Success rate: {:.1}%", stats.success_rate());
    if stats.rows_skipped > 0 {
        println!(
            "   • Rows skipped: {}",
            stats.rows_skipped.to_string().bright_red()
        );
        for error in stats.errors.iter().take(5) {
            println!("       {}", error.bright_black());
        }
    }
}

/// Print the outcome of joining HLR3 files
pub fn print_aggregate_stats(stats: &AggregateStats) {
    println!("📁 Full feed: {}", stats.output_path.display());
    println!(
        "   • Countries joined: {}",
        stats
            .countries_included
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    if !stats.countries_missing.is_empty() {
        println!(
            "   • {} {}",
            "Missing:".bright_yellow(),
            stats
                .countries_missing
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    println!("   • Bytes written: {}", stats.bytes_written);
}
