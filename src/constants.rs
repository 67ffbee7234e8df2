//! Application constants for the MNP normalizer
//!
//! File prefixes, network prefixes, column positions and date patterns for
//! every supported source format.

// =============================================================================
// Output Layout
// =============================================================================

/// Delimiter used by the HLR and HLR3 output files
pub const OUTPUT_DELIMITER: u8 = b';';

/// Extension of per-country output files
pub const OUTPUT_EXTENSION: &str = "csv";

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "mnp.toml";

/// Maximum number of row error messages kept in parse statistics
pub const MAX_RECORDED_ERRORS: usize = 100;

// =============================================================================
// Country Metadata
// =============================================================================

pub mod prefixes {
    pub const GEORGIA_FILE: &str = "georgia";
    pub const LATVIA_FILE: &str = "latvia";
    pub const KAZAKHSTAN_FILE: &str = "kazakhstan";
    pub const BELARUS_FILE: &str = "belarus";

    /// MCC 282 followed by the fixed trunk digit
    pub const GEORGIA_MCCMNC: &str = "2820";
    /// MCC 247 followed by the fixed trunk digit
    pub const LATVIA_MCCMNC: &str = "2470";
    /// MCC 401 followed by the fixed trunk digit
    pub const KAZAKHSTAN_MCCMNC: &str = "4010";
    /// MCC 257 followed by the fixed trunk digit
    pub const BELARUS_MCCMNC: &str = "2570";
}

// =============================================================================
// Source Formats
// =============================================================================

/// Belarus spreadsheet layout: MNC, MSISDN, port date
pub mod belarus {
    pub const DEFAULT_SHEET: &str = "Sheet1";
    /// 1-based row holding column titles
    pub const HEADER_ROW: usize = 1;
    pub const MNC_COLUMN: usize = 0;
    pub const NUMBER_COLUMN: usize = 1;
    pub const PORT_DATE_COLUMN: usize = 2;
    pub const DATE_PATTERN: &str = "%d.%m.%Y %H:%M:%S";
}

/// Kazakhstan positional CSV: Number, OwnerId, MNC, Route, PortDate, RowCount
pub mod kazakhstan {
    pub const DEFAULT_DELIMITER: char = ',';
    pub const NUMBER_COLUMN: usize = 0;
    pub const MNC_COLUMN: usize = 2;
    pub const ROUTE_COLUMN: usize = 3;
    pub const PORT_DATE_COLUMN: usize = 4;
    /// RowCount is optional on the trailing column
    pub const MIN_COLUMNS: usize = 5;
}

/// Georgia registry extract with record type and number type columns
pub mod georgia {
    pub const DELIMITER: u8 = b';';
    pub const RECORD_TYPE_COLUMN: usize = 0;
    pub const NUMBER_TYPE_COLUMN: usize = 2;
    pub const NUMBER_COLUMN: usize = 3;
    pub const OPERATOR_COLUMN: usize = 5;
    pub const PORT_DATE_COLUMN: usize = 9;
    pub const MIN_COLUMNS: usize = 10;

    /// Record type of a portability event
    pub const RECORD_TYPE_PORTING: &str = "10";
    /// Number type of a mobile subscriber
    pub const NUMBER_TYPE_MOBILE: &str = "2";
    pub const DATE_PATTERN: &str = "%Y-%m-%d %H:%M:%S";
}

// =============================================================================
// Environment Overrides
// =============================================================================

pub mod env {
    pub const HLR_DIRECTORY: &str = "MNP_HLR_DIRECTORY";
    pub const HLR3_DIRECTORY: &str = "MNP_HLR3_DIRECTORY";
    pub const FULL_HLR_FILE: &str = "MNP_FULL_HLR_FILE";
    pub const COUNTRIES: &str = "MNP_COUNTRIES";
    pub const LOG_LEVEL: &str = "MNP_LOG_LEVEL";
    pub const LOG_DIRECTORY: &str = "MNP_LOG_DIRECTORY";
    pub const LOG_FILENAME: &str = "MNP_LOG_FILENAME";
}
