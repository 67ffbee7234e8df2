//! Country parsers for MNP extract files
//!
//! Each supported country delivers its portability extract in its own
//! layout. Every parser turns one raw file into a [`ParseResult`] holding
//! paired HLR and HLR3 records in source row order.
//!
//! ## Architecture
//!
//! - [`belarus`] - spreadsheet rows with a templated mccmnc
//! - [`kazakhstan`] - positional CSV with a templated mccmnc and route owner
//! - [`georgia`] - filtered registry CSV with a coded operator table
//! - [`latvia`] - reserved source, not implemented
//! - [`fields`] - date and field helpers shared by the parsers
//!
//! A malformed row is logged and skipped, it never aborts the file. Errors
//! that concern the whole file are returned to the caller.
//!
//! ## Usage
//!
//! ```no_run
//! use mnp_normalizer::{Country, MnpConfig};
//! use mnp_normalizer::parsers::parser_for;
//!
//! # fn example() -> mnp_normalizer::Result<()> {
//! let config = MnpConfig::default();
//! let parser = parser_for(Country::Kazakhstan, &config)?;
//! let result = parser.parse(std::path::Path::new("kazakhstan.csv"))?;
//!
//! println!("{} HLR3 records", result.hlr3_records.len());
//! # Ok(())
//! # }
//! ```

pub mod belarus;
pub mod fields;
pub mod georgia;
pub mod kazakhstan;
pub mod latvia;

#[cfg(test)]
pub mod tests;

pub use belarus::BelarusParser;
pub use georgia::GeorgiaParser;
pub use kazakhstan::KazakhstanParser;
pub use latvia::LatviaParser;

use crate::config::MnpConfig;
use crate::country::Country;
use crate::error::{MnpError, Result};
use crate::models::{Hlr3Record, ParseResult};
use csv::StringRecord;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Normalizes one country's raw extract file
pub trait MnpParser {
    fn country(&self) -> Country;

    fn parse(&self, path: &Path) -> Result<ParseResult>;
}

/// Select the parser registered for a country.
///
/// Fails with [`MnpError::CountryDisabled`] when the country is switched off
/// in configuration. Unrecognized identifiers never get this far: they are
/// rejected by `Country::from_str` with [`MnpError::UnknownCountry`].
pub fn parser_for(country: Country, config: &MnpConfig) -> Result<Box<dyn MnpParser>> {
    if !config.is_enabled(country) {
        return Err(MnpError::CountryDisabled { country });
    }

    let parser: Box<dyn MnpParser> = match country {
        Country::Georgia => Box::new(GeorgiaParser::new(config.operator_table(country)?)),
        Country::Latvia => Box::new(LatviaParser),
        Country::Kazakhstan => Box::new(KazakhstanParser::new(&config.kazakhstan)?),
        Country::Belarus => Box::new(BelarusParser::new(&config.belarus)),
    };

    debug!("Selected parser for {}", country);
    Ok(parser)
}

/// What a delimited parser decided for one row
pub(crate) enum RowOutcome {
    Accepted(Hlr3Record),
    Filtered,
}

pub(crate) fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(MnpError::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}

pub(crate) fn row_error_message(row: usize, error: &MnpError) -> String {
    match error {
        MnpError::InvalidRow { .. } => error.to_string(),
        _ => format!("row {}: {}", row, error),
    }
}

/// Drive a CSV reader with a header line through a per-row normalizer.
///
/// Row-level errors are logged and counted; I/O errors abort the file.
pub(crate) fn normalize_delimited<R, F>(
    country: Country,
    source: &Path,
    mut reader: csv::Reader<R>,
    mut normalize_row: F,
) -> Result<ParseResult>
where
    R: Read,
    F: FnMut(&StringRecord, usize) -> Result<RowOutcome>,
{
    info!("Parsing {} MNP file: {}", country, source.display());
    let mut result = ParseResult::new();

    for (index, record) in reader.records().enumerate() {
        // line 1 is the header
        let row = record
            .as_ref()
            .ok()
            .and_then(|r| r.position())
            .map(|p| p.line() as usize)
            .unwrap_or(index + 2);
        result.stats.rows_total += 1;

        let record = match record {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(MnpError::csv(source, e)),
            Err(e) => {
                warn!("Skipping {} row {}: {}", country, row, e);
                result.stats.record_error(format!("row {}: {}", row, e));
                continue;
            }
        };

        match normalize_row(&record, row) {
            Ok(RowOutcome::Accepted(hlr3)) => result.push_pair(hlr3),
            Ok(RowOutcome::Filtered) => result.stats.rows_filtered += 1,
            Err(e) if !e.is_row_level() => return Err(e),
            Err(e) => {
                warn!("Skipping {} row {} {:?}: {}", country, row, record, e);
                result.stats.record_error(row_error_message(row, &e));
            }
        }
    }

    info!(
        "Parsed {} {} records from {} rows ({} filtered, {} skipped)",
        result.stats.rows_accepted,
        country,
        result.stats.rows_total,
        result.stats.rows_filtered,
        result.stats.rows_skipped
    );

    Ok(result)
}
