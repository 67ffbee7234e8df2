//! Persistence of parse results as per-country HLR and HLR3 files.
//!
//! Layouts are fixed for downstream loaders, semicolon-delimited with no
//! header row:
//!
//! - HLR: `dnis;mccmnc`
//! - HLR3: `dnis;mccmnc;active_from;ownerID;providerResponseCode`
//!
//! Absent optional values are written as empty fields.

use crate::aggregator::Aggregator;
use crate::constants::OUTPUT_DELIMITER;
use crate::country::Country;
use crate::error::{MnpError, Result};
use crate::models::ParseResult;
use std::path::{Path, PathBuf};
use tracing::info;

/// Files written for one country
#[derive(Debug, Clone, PartialEq)]
pub struct SavedFiles {
    pub hlr_path: PathBuf,
    pub hlr3_path: PathBuf,
    pub hlr_rows: usize,
    pub hlr3_rows: usize,
}

/// Stores a country's parse result
pub trait ResultSink {
    fn save(&self, result: &ParseResult, country: Country) -> Result<SavedFiles>;
}

/// Writes semicolon-delimited files keyed by the country's file prefix
#[derive(Debug, Clone)]
pub struct CsvResultWriter {
    hlr_directory: PathBuf,
    hlr3_directory: PathBuf,
}

impl CsvResultWriter {
    pub fn new(hlr_directory: impl Into<PathBuf>, hlr3_directory: impl Into<PathBuf>) -> Self {
        Self {
            hlr_directory: hlr_directory.into(),
            hlr3_directory: hlr3_directory.into(),
        }
    }

    fn open(path: &Path) -> Result<csv::Writer<std::fs::File>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        csv::WriterBuilder::new()
            .delimiter(OUTPUT_DELIMITER)
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_path(path)
            .map_err(|e| MnpError::csv(path, e))
    }

    fn write_hlr(&self, path: &Path, result: &ParseResult) -> Result<usize> {
        let mut writer = Self::open(path)?;
        for record in &result.hlr_records {
            writer
                .write_record([record.dnis.as_str(), record.mccmnc.as_str()])
                .map_err(|e| MnpError::csv(path, e))?;
        }
        writer.flush()?;
        Ok(result.hlr_records.len())
    }

    fn write_hlr3(&self, path: &Path, result: &ParseResult) -> Result<usize> {
        let mut writer = Self::open(path)?;
        for record in &result.hlr3_records {
            let active_from = record.active_from.to_string();
            writer
                .write_record([
                    record.dnis.as_str(),
                    record.mccmnc.as_str(),
                    active_from.as_str(),
                    record.owner_id.as_deref().unwrap_or(""),
                    record.provider_response_code.as_deref().unwrap_or(""),
                ])
                .map_err(|e| MnpError::csv(path, e))?;
        }
        writer.flush()?;
        Ok(result.hlr3_records.len())
    }
}

impl ResultSink for CsvResultWriter {
    fn save(&self, result: &ParseResult, country: Country) -> Result<SavedFiles> {
        info!("Start saving {} parse result", country);

        let hlr_path = Aggregator::country_file(&self.hlr_directory, country);
        info!("Saving HLR file to: {}", hlr_path.display());
        let hlr_rows = self.write_hlr(&hlr_path, result)?;

        let hlr3_path = Aggregator::country_file(&self.hlr3_directory, country);
        info!("Saving HLR3 file to: {}", hlr3_path.display());
        let hlr3_rows = self.write_hlr3(&hlr3_path, result)?;

        info!("Finished saving {} parse result", country);
        Ok(SavedFiles {
            hlr_path,
            hlr3_path,
            hlr_rows,
            hlr3_rows,
        })
    }
}
