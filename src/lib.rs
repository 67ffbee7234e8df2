//! MNP Normalizer Library
//!
//! Normalizes mobile number portability (MNP) extracts from several national
//! registries into two downstream record layouts:
//!
//! - HLR records (`dnis;mccmnc`) for number-to-network lookups
//! - HLR3 records (`dnis;mccmnc;active_from;ownerID;providerResponseCode`)
//!   for loads that need the portability effective date
//!
//! This library provides tools for:
//! - Parsing each country's raw extract format into paired records
//! - Persisting results as per-country semicolon-delimited files
//! - Joining the per-country HLR3 files into one full feed
//! - Running the whole daily cycle with per-country error isolation

pub mod aggregator;
pub mod config;
pub mod constants;
pub mod country;
pub mod error;
pub mod models;
pub mod parsers;
pub mod pipeline;
pub mod source;
pub mod writer;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::MnpConfig;
pub use country::Country;
pub use error::{MnpError, Result};
pub use models::{Hlr3Record, HlrRecord, ParseResult, ParseStats};
