//! Tests for the country parsers and the dispatcher
//!
//! Covers row eligibility, mccmnc derivation and row-level recovery for
//! every source format, using scratch files where the parser reads from disk.

pub mod dispatch_tests;

use std::io::Write;
use tempfile::NamedTempFile;

/// Create a temporary extract file with the given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
