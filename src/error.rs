//! Error handling for MNP normalization.
//!
//! File-level failures surface as [`MnpError`] values to the caller. Row-level
//! failures use the same type inside the parsers but are recovered locally and
//! only recorded in the parse statistics.

use crate::country::Country;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MnpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error in file {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Spreadsheet error in file {path}: {source}")]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Failed to parse configuration file {path}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Worksheet '{sheet}' not found in {path}")]
    WorksheetNotFound { path: PathBuf, sheet: String },

    #[error("Unknown country identifier: '{identifier}'")]
    UnknownCountry { identifier: String },

    #[error("Country {country} is disabled in configuration")]
    CountryDisabled { country: Country },

    #[error("Parser for {country} is not implemented")]
    NotImplemented { country: Country },

    #[error("No source file available for {country} in {directory}")]
    NoFileAvailable { country: Country, directory: PathBuf },

    #[error("Expected one source file for {country} in {directory}, found {count}")]
    TooManyFiles {
        country: Country,
        directory: PathBuf,
        count: usize,
    },

    #[error(
        "Parse result for {country} is empty: {hlr_count} HLR records, {hlr3_count} HLR3 records"
    )]
    EmptyResult {
        country: Country,
        hlr_count: usize,
        hlr3_count: usize,
    },

    #[error("Invalid row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("Invalid date '{value}' (expected {pattern})")]
    InvalidDate { value: String, pattern: String },

    #[error("Unknown operator code '{code}'")]
    UnknownOperatorCode { code: String },
}

impl MnpError {
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn invalid_row(row: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRow {
            row,
            reason: reason.into(),
        }
    }

    pub fn invalid_date(value: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
            pattern: pattern.into(),
        }
    }

    /// Whether the error only concerns a single row and parsing can go on
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            MnpError::InvalidRow { .. }
                | MnpError::InvalidDate { .. }
                | MnpError::UnknownOperatorCode { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MnpError>;
