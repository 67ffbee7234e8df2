//! Supported countries and their static metadata.

use crate::constants::prefixes;
use crate::error::MnpError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Closed set of MNP sources, in processing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    Georgia,
    Latvia,
    Kazakhstan,
    Belarus,
}

impl Country {
    /// Every country in enumeration order
    pub const ALL: [Country; 4] = [
        Country::Georgia,
        Country::Latvia,
        Country::Kazakhstan,
        Country::Belarus,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Country::Georgia => "Georgia",
            Country::Latvia => "Latvia",
            Country::Kazakhstan => "Kazakhstan",
            Country::Belarus => "Belarus",
        }
    }

    pub fn metadata(&self) -> CountryMetadata {
        match self {
            Country::Georgia => CountryMetadata {
                file_prefix: prefixes::GEORGIA_FILE,
                mccmnc_prefix: prefixes::GEORGIA_MCCMNC,
            },
            Country::Latvia => CountryMetadata {
                file_prefix: prefixes::LATVIA_FILE,
                mccmnc_prefix: prefixes::LATVIA_MCCMNC,
            },
            Country::Kazakhstan => CountryMetadata {
                file_prefix: prefixes::KAZAKHSTAN_FILE,
                mccmnc_prefix: prefixes::KAZAKHSTAN_MCCMNC,
            },
            Country::Belarus => CountryMetadata {
                file_prefix: prefixes::BELARUS_FILE,
                mccmnc_prefix: prefixes::BELARUS_MCCMNC,
            },
        }
    }

    pub fn file_prefix(&self) -> &'static str {
        self.metadata().file_prefix
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Country {
    type Err = MnpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "georgia" | "ge" => Ok(Country::Georgia),
            "latvia" | "lv" => Ok(Country::Latvia),
            "kazakhstan" | "kz" => Ok(Country::Kazakhstan),
            "belarus" | "by" => Ok(Country::Belarus),
            _ => Err(MnpError::UnknownCountry {
                identifier: s.to_string(),
            }),
        }
    }
}

/// Static per-country metadata
#[derive(Debug, Clone, Copy)]
pub struct CountryMetadata {
    /// Names the per-country output files and directories
    pub file_prefix: &'static str,
    /// Mobile country code plus trunk digit, used when templating mccmnc
    pub mccmnc_prefix: &'static str,
}

impl CountryMetadata {
    /// Concatenate the network prefix with a raw operator code
    pub fn templated_mccmnc(&self, operator_code: &str) -> String {
        format!("{}{}", self.mccmnc_prefix, operator_code)
    }
}

/// Mapping from a coded operator identifier to a full mccmnc
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorTable {
    codes: BTreeMap<u32, String>,
}

impl OperatorTable {
    pub fn new(codes: BTreeMap<u32, String>) -> Self {
        Self { codes }
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (u32, &'a str)>) -> Self {
        Self {
            codes: pairs
                .into_iter()
                .map(|(code, mccmnc)| (code, mccmnc.to_string()))
                .collect(),
        }
    }

    /// Resolve a raw operator code field; `None` when it is not a known code
    pub fn lookup(&self, raw_code: &str) -> Option<&str> {
        let code = raw_code.trim().parse::<u32>().ok()?;
        self.codes.get(&code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
