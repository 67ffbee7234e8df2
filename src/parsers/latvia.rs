//! Latvia MNP extract.
//!
//! The Latvian source is registered but its format has not been onboarded.
//! Parsing fails with [`MnpError::NotImplemented`] so that the orchestrator
//! never mistakes it for a source with zero ported numbers.

use super::MnpParser;
use crate::country::Country;
use crate::error::{MnpError, Result};
use crate::models::ParseResult;
use std::path::Path;
use tracing::error;

#[derive(Debug, Clone, Copy, Default)]
pub struct LatviaParser;

impl MnpParser for LatviaParser {
    fn country(&self) -> Country {
        Country::Latvia
    }

    fn parse(&self, path: &Path) -> Result<ParseResult> {
        error!(
            "Refusing to parse {}: Latvia parser is not implemented",
            path.display()
        );
        Err(MnpError::NotImplemented {
            country: Country::Latvia,
        })
    }
}
