//! Core data structures for MNP normalization.
//!
//! Defines the two canonical record shapes written for downstream
//! provisioning, the result container that pairs them, and parsing
//! statistics.

use crate::constants::MAX_RECORDED_ERRORS;
use serde::{Deserialize, Serialize};

/// Minimal number-to-network lookup entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HlrRecord {
    pub dnis: String,
    pub mccmnc: String,
}

/// Load entry for the routing system, including the portability date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hlr3Record {
    pub dnis: String,
    pub mccmnc: String,
    /// Unix timestamp in seconds
    pub active_from: i64,
    #[serde(rename = "ownerID")]
    pub owner_id: Option<String>,
    /// Filled in by the provisioning system, never at parse time
    #[serde(rename = "providerResponseCode")]
    pub provider_response_code: Option<String>,
}

impl Hlr3Record {
    pub fn new(
        dnis: impl Into<String>,
        mccmnc: impl Into<String>,
        active_from: i64,
        owner_id: Option<String>,
    ) -> Self {
        Self {
            dnis: dnis.into(),
            mccmnc: mccmnc.into(),
            active_from,
            owner_id,
            provider_response_code: None,
        }
    }

    /// The lookup entry derived from the same row
    pub fn to_hlr(&self) -> HlrRecord {
        HlrRecord {
            dnis: self.dnis.clone(),
            mccmnc: self.mccmnc.clone(),
        }
    }
}

/// Normalized output of a single parse call
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    pub hlr_records: Vec<HlrRecord>,
    pub hlr3_records: Vec<Hlr3Record>,
    pub stats: ParseStats,
}

impl ParseResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append both records for one accepted row
    pub fn push_pair(&mut self, record: Hlr3Record) {
        self.hlr_records.push(record.to_hlr());
        self.hlr3_records.push(record);
        self.stats.rows_accepted += 1;
    }

    /// Append only the lookup record (row whose HLR3 derivation failed)
    pub fn push_hlr_only(&mut self, record: HlrRecord) {
        self.hlr_records.push(record);
    }

    /// True when either record sequence is empty
    pub fn is_empty(&self) -> bool {
        self.hlr_records.is_empty() || self.hlr3_records.is_empty()
    }

    /// Check that both sequences have the same length and agree row by row
    pub fn is_paired(&self) -> bool {
        self.hlr_records.len() == self.hlr3_records.len()
            && self
                .hlr_records
                .iter()
                .zip(&self.hlr3_records)
                .all(|(hlr, hlr3)| hlr.dnis == hlr3.dnis && hlr.mccmnc == hlr3.mccmnc)
    }
}

/// Row accounting for one parsed file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Data rows read from the file, header excluded
    pub rows_total: usize,

    /// Rows that produced an HLR/HLR3 pair
    pub rows_accepted: usize,

    /// Rows that were read but are not eligible for this feed
    pub rows_filtered: usize,

    /// Rows skipped because of a row-level error
    pub rows_skipped: usize,

    /// First row errors, for reporting
    pub errors: Vec<String>,
}

impl ParseStats {
    pub fn record_error(&mut self, message: String) {
        self.rows_skipped += 1;
        if self.errors.len() < MAX_RECORDED_ERRORS {
            self.errors.push(message);
        }
    }

    /// Accepted rows as a percentage of eligible rows
    pub fn success_rate(&self) -> f64 {
        let eligible = self.rows_total.saturating_sub(self.rows_filtered);
        if eligible == 0 {
            0.0
        } else {
            (self.rows_accepted as f64 / eligible as f64) * 100.0
        }
    }
}
