//! Field parsing utilities shared by the country parsers
//!
//! Date conversion to Unix timestamps, required-field access on CSV records
//! and rendering of spreadsheet cells.

use crate::error::{MnpError, Result};
use calamine::Data;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;

/// Naive layouts accepted as ISO-8601 after RFC 3339 fails
const ISO_NAIVE_PATTERNS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Offset layouts accepted as ISO-8601 with a space separator
const ISO_OFFSET_PATTERNS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%z"];

/// Parse a naive date with a fixed pattern and return its UTC Unix timestamp
pub fn parse_timestamp(value: &str, pattern: &str) -> Result<i64> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), pattern)
        .map_err(|_| MnpError::invalid_date(value, pattern))?;

    positive(naive.and_utc().timestamp(), value, pattern)
}

/// Parse an ISO-8601 date or date-time and return its Unix timestamp.
///
/// Values with an offset are converted exactly, naive values are taken as UTC.
pub fn parse_iso8601_timestamp(value: &str) -> Result<i64> {
    const EXPECTED: &str = "ISO-8601";
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return positive(dt.timestamp(), value, EXPECTED);
    }

    for pattern in ISO_OFFSET_PATTERNS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, pattern) {
            return positive(dt.timestamp(), value, EXPECTED);
        }
    }

    for pattern in ISO_NAIVE_PATTERNS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return positive(naive.and_utc().timestamp(), value, EXPECTED);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return positive(midnight.and_utc().timestamp(), value, EXPECTED);
        }
    }

    Err(MnpError::invalid_date(value, EXPECTED))
}

fn positive(timestamp: i64, value: &str, pattern: &str) -> Result<i64> {
    if timestamp > 0 {
        Ok(timestamp)
    } else {
        Err(MnpError::invalid_date(value, pattern))
    }
}

/// Get a trimmed, non-empty field from a CSV record
pub fn required_field<'a>(
    record: &'a StringRecord,
    index: usize,
    name: &str,
    row: usize,
) -> Result<&'a str> {
    let value = record
        .get(index)
        .ok_or_else(|| MnpError::invalid_row(row, format!("missing column {}", name)))?
        .trim();

    if value.is_empty() {
        return Err(MnpError::invalid_row(row, format!("empty {}", name)));
    }

    Ok(value)
}

/// Render a spreadsheet cell as text; `None` for empty cells.
///
/// Whole-number floats render without a decimal part, since spreadsheets
/// store numeric codes and subscriber numbers as floats.
pub fn cell_text(cell: Option<&Data>) -> Option<String> {
    let text = match cell? {
        Data::Empty => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            (*f as i64).to_string()
        }
        other => other.to_string(),
    };

    (!text.is_empty()).then_some(text)
}

/// True for a non-empty run of ASCII digits
pub fn is_subscriber_number(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}
