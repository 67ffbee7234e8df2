//! Belarus MNP extract: spreadsheet workbook
//!
//! Every row of the configured worksheet holds the operator code (MNC), the
//! subscriber number and the port date as `day.month.year h:m:s`.

use super::fields::{cell_text, is_subscriber_number, parse_timestamp};
use super::{MnpParser, ensure_exists, row_error_message};
use crate::config::BelarusSettings;
use crate::constants::belarus::{
    DATE_PATTERN, HEADER_ROW, MNC_COLUMN, NUMBER_COLUMN, PORT_DATE_COLUMN,
};
use crate::country::{Country, CountryMetadata};
use crate::error::{MnpError, Result};
use crate::models::{Hlr3Record, HlrRecord, ParseResult};
use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct BelarusParser {
    metadata: CountryMetadata,
    sheet_name: String,
    keep_unpaired_hlr: bool,
}

impl BelarusParser {
    pub fn new(settings: &BelarusSettings) -> Self {
        Self {
            metadata: Country::Belarus.metadata(),
            sheet_name: settings.sheet_name.clone(),
            keep_unpaired_hlr: settings.keep_unpaired_hlr,
        }
    }

    /// Normalize worksheet rows in order; row numbers are 1-based like the sheet
    pub fn normalize_rows<'a, I>(&self, rows: I) -> ParseResult
    where
        I: IntoIterator<Item = &'a [Data]>,
    {
        let mut result = ParseResult::new();

        for (index, cells) in rows.into_iter().enumerate() {
            self.normalize_row(cells, index + 1, &mut result);
        }

        info!(
            "Parsed {} Belarus records from {} rows ({} filtered, {} skipped)",
            result.stats.rows_accepted,
            result.stats.rows_total,
            result.stats.rows_filtered,
            result.stats.rows_skipped
        );
        result
    }

    fn normalize_row(&self, cells: &[Data], row: usize, result: &mut ParseResult) {
        result.stats.rows_total += 1;

        let dnis = match cell_text(cells.get(NUMBER_COLUMN)) {
            Some(number) if is_subscriber_number(&number) => number,
            None => {
                debug!("Ignoring blank Belarus row {}", row);
                result.stats.rows_filtered += 1;
                return;
            }
            Some(label) if row == HEADER_ROW => {
                debug!("Ignoring Belarus header row ({})", label);
                result.stats.rows_filtered += 1;
                return;
            }
            Some(number) => {
                let error =
                    MnpError::invalid_row(row, format!("subscriber number '{}' is not numeric", number));
                warn!("Skipping Belarus row {}: {}", row, error);
                result.stats.record_error(error.to_string());
                return;
            }
        };

        let Some(mnc) = cell_text(cells.get(MNC_COLUMN)) else {
            let error = MnpError::invalid_row(row, "missing operator code");
            warn!("Skipping Belarus row {}: {}", row, error);
            result.stats.record_error(error.to_string());
            return;
        };
        let mccmnc = self.metadata.templated_mccmnc(&mnc);

        let active_from = cell_text(cells.get(PORT_DATE_COLUMN))
            .ok_or_else(|| MnpError::invalid_row(row, "missing port date"))
            .and_then(|date| parse_timestamp(&date, DATE_PATTERN));

        match active_from {
            Ok(active_from) => {
                result.push_pair(Hlr3Record::new(dnis, mccmnc, active_from, None));
            }
            Err(e) => {
                warn!(
                    "Failed to derive HLR3 record for Belarus row {} ({}, {}, {:?}): {}",
                    row,
                    mnc,
                    dnis,
                    cells.get(PORT_DATE_COLUMN),
                    e
                );
                result.stats.record_error(row_error_message(row, &e));
                if self.keep_unpaired_hlr {
                    result.push_hlr_only(HlrRecord { dnis, mccmnc });
                }
            }
        }
    }
}

impl MnpParser for BelarusParser {
    fn country(&self) -> Country {
        Country::Belarus
    }

    fn parse(&self, path: &Path) -> Result<ParseResult> {
        ensure_exists(path)?;
        info!("Parsing Belarus MNP file: {}", path.display());

        let mut workbook = open_workbook_auto(path).map_err(|source| MnpError::Spreadsheet {
            path: path.to_path_buf(),
            source,
        })?;

        if !workbook.sheet_names().contains(&self.sheet_name) {
            return Err(MnpError::WorksheetNotFound {
                path: path.to_path_buf(),
                sheet: self.sheet_name.clone(),
            });
        }

        let range = workbook
            .worksheet_range(&self.sheet_name)
            .map_err(|source| MnpError::Spreadsheet {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(self.normalize_rows(range.rows()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(mnc: Data, msisdn: Data, date: Data) -> Vec<Data> {
        vec![mnc, msisdn, date]
    }

    fn text(value: &str) -> Data {
        Data::String(value.to_string())
    }

    #[test]
    fn test_numeric_cells_render_as_codes() {
        let rows = vec![row(
            Data::Float(5.0),
            Data::Float(375291234567.0),
            text("01.02.2024 09:30:00"),
        )];

        let parser = BelarusParser::new(&BelarusSettings::default());
        let result = parser.normalize_rows(rows.iter().map(Vec::as_slice));

        assert_eq!(result.hlr_records.len(), 1);
        assert_eq!(result.hlr_records[0].dnis, "375291234567");
        assert_eq!(result.hlr_records[0].mccmnc, "25705");
        assert_eq!(result.hlr3_records[0].active_from, 1_706_779_800);
    }

    #[test]
    fn test_blank_rows_are_filtered() {
        let rows = vec![
            vec![],
            row(Data::Empty, Data::Empty, Data::Empty),
            row(text("2"), text("375331234567"), text("01.02.2024 09:30:00")),
        ];

        let parser = BelarusParser::new(&BelarusSettings::default());
        let result = parser.normalize_rows(rows.iter().map(Vec::as_slice));

        assert_eq!(result.stats.rows_total, 3);
        assert_eq!(result.stats.rows_filtered, 2);
        assert_eq!(result.stats.rows_accepted, 1);
    }

    #[test]
    fn test_non_numeric_number_after_header_is_skipped() {
        let rows = vec![
            row(text("MNC"), text("MSISDN"), text("PORT_DATE")),
            row(text("2"), text("+375291234567"), text("01.02.2024 09:30:00")),
            row(text("2"), text("375331234567"), text("01.02.2024 09:30:00")),
        ];

        let parser = BelarusParser::new(&BelarusSettings::default());
        let result = parser.normalize_rows(rows.iter().map(Vec::as_slice));

        assert_eq!(result.stats.rows_filtered, 1);
        assert_eq!(result.stats.rows_skipped, 1);
        assert_eq!(result.stats.rows_accepted, 1);
        assert!(result.stats.errors[0].starts_with("Invalid row 2:"));
        assert!(result.stats.errors[0].contains("+375291234567"));
    }

    #[test]
    fn test_missing_operator_code_skips_row() {
        let rows = vec![row(
            Data::Empty,
            text("375331234567"),
            text("01.02.2024 09:30:00"),
        )];

        let parser = BelarusParser::new(&BelarusSettings::default());
        let result = parser.normalize_rows(rows.iter().map(Vec::as_slice));

        assert!(result.hlr_records.is_empty());
        assert_eq!(result.stats.rows_skipped, 1);
    }

    #[test]
    fn test_missing_workbook() {
        let parser = BelarusParser::new(&BelarusSettings::default());
        let result = parser.parse(Path::new("/nonexistent/belarus.xlsx"));
        assert!(matches!(result, Err(MnpError::FileNotFound { .. })));
    }
}
