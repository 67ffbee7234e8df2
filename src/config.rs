//! Configuration management and validation.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then environment variables (a `.env` file is honoured). Per-country
//! sections carry the source directory and format options for each
//! parser.

use crate::constants::{DEFAULT_CONFIG_FILE, belarus, env, kazakhstan};
use crate::country::{Country, OperatorTable};
use crate::error::{MnpError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Global configuration for MNP normalization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MnpConfig {
    /// Root of per-country HLR (`dnis;mccmnc`) files
    pub hlr_directory: PathBuf,

    /// Root of per-country HLR3 files, also the aggregation input
    pub hlr3_directory: PathBuf,

    /// Aggregated feed written after all countries are processed
    pub full_hlr_file: PathBuf,

    /// Countries enabled for processing
    pub countries: Vec<Country>,

    pub georgia: GeorgiaSettings,
    pub latvia: LatviaSettings,
    pub kazakhstan: KazakhstanSettings,
    pub belarus: BelarusSettings,

    pub logging: LoggingConfig,
}

/// Georgian registry extract settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeorgiaSettings {
    pub source_directory: Option<PathBuf>,

    /// Registry operator code to mccmnc. Required when Georgia is enabled.
    pub operator_table: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LatviaSettings {
    pub source_directory: Option<PathBuf>,
}

/// Kazakhstan positional CSV settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KazakhstanSettings {
    pub source_directory: Option<PathBuf>,
    pub delimiter: char,
}

impl Default for KazakhstanSettings {
    fn default() -> Self {
        Self {
            source_directory: None,
            delimiter: kazakhstan::DEFAULT_DELIMITER,
        }
    }
}

/// Belarus spreadsheet settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BelarusSettings {
    pub source_directory: Option<PathBuf>,
    pub sheet_name: String,

    /// Keep the HLR record of a row whose port date cannot be parsed.
    /// Off by default so the two record sequences stay paired.
    pub keep_unpaired_hlr: bool,
}

impl Default for BelarusSettings {
    fn default() -> Self {
        Self {
            source_directory: None,
            sheet_name: belarus::DEFAULT_SHEET.to_string(),
            keep_unpaired_hlr: false,
        }
    }
}

/// Logging output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when RUST_LOG is not set
    pub level: String,

    /// Directory for a daily rolling log file; console only when unset
    pub directory: Option<PathBuf>,

    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_name: "mnp-normalizer.log".to_string(),
        }
    }
}

impl Default for MnpConfig {
    fn default() -> Self {
        Self {
            hlr_directory: PathBuf::from("output/hlr"),
            hlr3_directory: PathBuf::from("output/hlr3"),
            full_hlr_file: PathBuf::from("output/full_hlr.csv"),
            countries: vec![Country::Kazakhstan, Country::Belarus],
            georgia: GeorgiaSettings::default(),
            latvia: LatviaSettings::default(),
            kazakhstan: KazakhstanSettings::default(),
            belarus: BelarusSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl MnpConfig {
    /// Load configuration from file and environment.
    ///
    /// An explicit path must exist. Without one, `mnp.toml` in the working
    /// directory is used when present, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Ok(env_file) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", env_file.display());
        }

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    debug!("No configuration file, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MnpError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content).map_err(|source| MnpError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Override settings from environment variables provided by `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(env::HLR_DIRECTORY) {
            self.hlr_directory = PathBuf::from(value);
        }
        if let Some(value) = lookup(env::HLR3_DIRECTORY) {
            self.hlr3_directory = PathBuf::from(value);
        }
        if let Some(value) = lookup(env::FULL_HLR_FILE) {
            self.full_hlr_file = PathBuf::from(value);
        }
        if let Some(value) = lookup(env::COUNTRIES) {
            self.countries = value
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(str::parse)
                .collect::<Result<Vec<Country>>>()?;
        }
        if let Some(value) = lookup(env::LOG_LEVEL) {
            self.logging.level = value;
        }
        if let Some(value) = lookup(env::LOG_DIRECTORY) {
            self.logging.directory = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup(env::LOG_FILENAME) {
            self.logging.file_name = value;
        }

        for country in Country::ALL {
            let key = format!("MNP_{}_SOURCE_DIRECTORY", country.name().to_uppercase());
            if let Some(value) = lookup(&key) {
                *self.source_directory_mut(country) = Some(PathBuf::from(value));
            }
        }

        Ok(())
    }

    /// Check settings that deserialization alone cannot enforce
    pub fn validate(&self) -> Result<()> {
        if self.countries.is_empty() {
            return Err(MnpError::configuration("No countries enabled"));
        }

        if !self.kazakhstan.delimiter.is_ascii() {
            return Err(MnpError::configuration(format!(
                "Kazakhstan delimiter must be a single ASCII character, got '{}'",
                self.kazakhstan.delimiter
            )));
        }

        if self.belarus.sheet_name.trim().is_empty() {
            return Err(MnpError::configuration("Belarus sheet name is empty"));
        }

        if self.is_enabled(Country::Georgia) {
            self.operator_table(Country::Georgia)?;
        }
        Ok(())
    }

    pub fn is_enabled(&self, country: Country) -> bool {
        self.countries.contains(&country)
    }

    /// Enabled countries in enumeration order, without duplicates
    pub fn enabled_countries(&self) -> Vec<Country> {
        Country::ALL
            .into_iter()
            .filter(|country| self.is_enabled(*country))
            .collect()
    }

    pub fn source_directory(&self, country: Country) -> Option<&Path> {
        match country {
            Country::Georgia => self.georgia.source_directory.as_deref(),
            Country::Latvia => self.latvia.source_directory.as_deref(),
            Country::Kazakhstan => self.kazakhstan.source_directory.as_deref(),
            Country::Belarus => self.belarus.source_directory.as_deref(),
        }
    }

    fn source_directory_mut(&mut self, country: Country) -> &mut Option<PathBuf> {
        match country {
            Country::Georgia => &mut self.georgia.source_directory,
            Country::Latvia => &mut self.latvia.source_directory,
            Country::Kazakhstan => &mut self.kazakhstan.source_directory,
            Country::Belarus => &mut self.belarus.source_directory,
        }
    }

    /// Configured operator code table of a coded-format country
    pub fn operator_table(&self, country: Country) -> Result<OperatorTable> {
        let configured = match country {
            Country::Georgia => self.georgia.operator_table.as_ref(),
            _ => None,
        };

        let Some(configured) = configured.filter(|table| !table.is_empty()) else {
            return Err(MnpError::configuration(format!(
                "{} needs a non-empty [{}.operator_table] section",
                country,
                country.file_prefix()
            )));
        };

        let mut codes = BTreeMap::new();
        for (code, mccmnc) in configured {
            let code = code.trim().parse::<u32>().map_err(|_| {
                MnpError::configuration(format!(
                    "{} operator code '{}' is not a number",
                    country, code
                ))
            })?;
            if mccmnc.trim().is_empty() {
                return Err(MnpError::configuration(format!(
                    "{} operator code {} maps to an empty mccmnc",
                    country, code
                )));
            }
            codes.insert(code, mccmnc.trim().to_string());
        }

        Ok(OperatorTable::new(codes))
    }

    /// Enable a set of countries
    pub fn with_countries(mut self, countries: Vec<Country>) -> Self {
        self.countries = countries;
        self
    }

    /// Place HLR, HLR3 and aggregate outputs under one root directory
    pub fn with_output_root(mut self, root: &Path) -> Self {
        self.hlr_directory = root.join("hlr");
        self.hlr3_directory = root.join("hlr3");
        self.full_hlr_file = root.join("full_hlr.csv");
        self
    }

    /// Set the drop directory for one country
    pub fn with_source_directory(mut self, country: Country, directory: PathBuf) -> Self {
        *self.source_directory_mut(country) = Some(directory);
        self
    }
}
