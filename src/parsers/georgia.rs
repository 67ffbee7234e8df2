//! Georgia MNP extract: semicolon CSV from the national registry
//!
//! The registry multiplexes several record and number types into one file.
//! Only portability events for mobile numbers are normalized. The operator
//! is reported as a code and resolved through an [`OperatorTable`].

use super::fields::{parse_timestamp, required_field};
use super::{MnpParser, RowOutcome, ensure_exists, normalize_delimited};
use crate::constants::georgia::{
    DATE_PATTERN, DELIMITER, MIN_COLUMNS, NUMBER_COLUMN, NUMBER_TYPE_COLUMN, NUMBER_TYPE_MOBILE,
    OPERATOR_COLUMN, PORT_DATE_COLUMN, RECORD_TYPE_COLUMN, RECORD_TYPE_PORTING,
};
use crate::country::{Country, OperatorTable};
use crate::error::{MnpError, Result};
use crate::models::{Hlr3Record, ParseResult};
use csv::StringRecord;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct GeorgiaParser {
    operators: OperatorTable,
}

impl GeorgiaParser {
    pub fn new(operators: OperatorTable) -> Self {
        Self { operators }
    }

    /// Parse an extract from any reader; `source` only labels log output
    pub fn parse_reader<R: Read>(&self, input: R, source: &Path) -> Result<ParseResult> {
        let reader = Self::reader_builder().from_reader(input);
        normalize_delimited(Country::Georgia, source, reader, |record, row| {
            self.normalize_row(record, row)
        })
    }

    fn reader_builder() -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder.delimiter(DELIMITER).has_headers(true).flexible(true);
        builder
    }

    fn is_eligible(record: &StringRecord) -> bool {
        let field = |index| record.get(index).map(str::trim);
        field(RECORD_TYPE_COLUMN) == Some(RECORD_TYPE_PORTING)
            && field(NUMBER_TYPE_COLUMN) == Some(NUMBER_TYPE_MOBILE)
    }

    fn normalize_row(&self, record: &StringRecord, row: usize) -> Result<RowOutcome> {
        if !Self::is_eligible(record) {
            return Ok(RowOutcome::Filtered);
        }

        if record.len() < MIN_COLUMNS {
            return Err(MnpError::invalid_row(
                row,
                format!("expected at least {} columns, found {}", MIN_COLUMNS, record.len()),
            ));
        }

        let dnis = required_field(record, NUMBER_COLUMN, "number", row)?;
        let code = required_field(record, OPERATOR_COLUMN, "operator code", row)?;

        // An unknown code drops the whole row
        let mccmnc = self
            .operators
            .lookup(code)
            .ok_or_else(|| MnpError::UnknownOperatorCode {
                code: code.to_string(),
            })?;

        let port_date = required_field(record, PORT_DATE_COLUMN, "port date", row)?;
        let active_from = parse_timestamp(port_date, DATE_PATTERN)?;

        Ok(RowOutcome::Accepted(Hlr3Record::new(
            dnis,
            mccmnc,
            active_from,
            None,
        )))
    }
}

impl MnpParser for GeorgiaParser {
    fn country(&self) -> Country {
        Country::Georgia
    }

    fn parse(&self, path: &Path) -> Result<ParseResult> {
        ensure_exists(path)?;
        let reader = Self::reader_builder()
            .from_path(path)
            .map_err(|e| MnpError::csv(path, e))?;

        normalize_delimited(Country::Georgia, path, reader, |record, row| {
            self.normalize_row(record, row)
        })
    }
}
