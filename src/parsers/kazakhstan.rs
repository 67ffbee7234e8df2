//! Kazakhstan MNP extract: positional delimited CSV
//!
//! Columns are `Number, OwnerId, MNC, Route, PortDate, RowCount` after a
//! header line. mccmnc is the country prefix followed by the MNC column,
//! the route column becomes the HLR3 owner and the port date is ISO-8601.

use super::fields::{parse_iso8601_timestamp, required_field};
use super::{MnpParser, RowOutcome, ensure_exists, normalize_delimited};
use crate::config::KazakhstanSettings;
use crate::constants::kazakhstan::{
    MIN_COLUMNS, MNC_COLUMN, NUMBER_COLUMN, PORT_DATE_COLUMN, ROUTE_COLUMN,
};
use crate::country::{Country, CountryMetadata};
use crate::error::{MnpError, Result};
use crate::models::{Hlr3Record, ParseResult};
use csv::StringRecord;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct KazakhstanParser {
    metadata: CountryMetadata,
    delimiter: u8,
}

impl KazakhstanParser {
    /// Fails when the configured delimiter is not a single ASCII character
    pub fn new(settings: &KazakhstanSettings) -> Result<Self> {
        let delimiter = u8::try_from(settings.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                MnpError::configuration(format!(
                    "Kazakhstan delimiter must be a single ASCII character, got '{}'",
                    settings.delimiter
                ))
            })?;

        Ok(Self {
            metadata: Country::Kazakhstan.metadata(),
            delimiter,
        })
    }

    /// Parse an extract from any reader; `source` only labels log output
    pub fn parse_reader<R: Read>(&self, input: R, source: &Path) -> Result<ParseResult> {
        let reader = self.reader_builder().from_reader(input);
        normalize_delimited(Country::Kazakhstan, source, reader, |record, row| {
            self.normalize_row(record, row)
        })
    }

    fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true);
        builder
    }

    fn normalize_row(&self, record: &StringRecord, row: usize) -> Result<RowOutcome> {
        if record.len() < MIN_COLUMNS {
            return Err(MnpError::invalid_row(
                row,
                format!("expected at least {} columns, found {}", MIN_COLUMNS, record.len()),
            ));
        }

        let dnis = required_field(record, NUMBER_COLUMN, "Number", row)?;
        let mnc = required_field(record, MNC_COLUMN, "MNC", row)?;
        let route = record
            .get(ROUTE_COLUMN)
            .map(str::trim)
            .filter(|route| !route.is_empty())
            .map(str::to_string);
        let port_date = required_field(record, PORT_DATE_COLUMN, "PortDate", row)?;

        let active_from = parse_iso8601_timestamp(port_date)?;

        Ok(RowOutcome::Accepted(Hlr3Record::new(
            dnis,
            self.metadata.templated_mccmnc(mnc),
            active_from,
            route,
        )))
    }
}

impl MnpParser for KazakhstanParser {
    fn country(&self) -> Country {
        Country::Kazakhstan
    }

    fn parse(&self, path: &Path) -> Result<ParseResult> {
        ensure_exists(path)?;
        let reader = self
            .reader_builder()
            .from_path(path)
            .map_err(|e| MnpError::csv(path, e))?;

        normalize_delimited(Country::Kazakhstan, path, reader, |record, row| {
            self.normalize_row(record, row)
        })
    }
}
