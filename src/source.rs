//! Raw extract acquisition.
//!
//! Each country drops its extract into its own directory. A directory must
//! hold exactly one regular file when the pipeline runs; hidden files are
//! ignored.

use crate::config::MnpConfig;
use crate::country::Country;
use crate::error::{MnpError, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info};

/// Provides the raw extract file for a country
pub trait FileSource {
    fn fetch(&self, country: Country) -> Result<PathBuf>;
}

/// Picks the single file found in each country's drop directory
#[derive(Debug, Clone, Default)]
pub struct DirectorySource {
    directories: BTreeMap<Country, PathBuf>,
}

impl DirectorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &MnpConfig) -> Self {
        Country::ALL
            .into_iter()
            .filter_map(|country| {
                config
                    .source_directory(country)
                    .map(|dir| (country, dir.to_path_buf()))
            })
            .fold(Self::new(), |source, (country, dir)| {
                source.with_directory(country, dir)
            })
    }

    pub fn with_directory(mut self, country: Country, directory: impl Into<PathBuf>) -> Self {
        self.directories.insert(country, directory.into());
        self
    }
}

impl FileSource for DirectorySource {
    fn fetch(&self, country: Country) -> Result<PathBuf> {
        let directory = self.directories.get(&country).ok_or_else(|| {
            MnpError::configuration(format!("No source directory configured for {}", country))
        })?;

        if !directory.is_dir() {
            return Err(MnpError::FileNotFound {
                path: directory.clone(),
            });
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(directory)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if entry.file_name().to_string_lossy().starts_with('.') {
                debug!("Ignoring hidden file {}", entry.path().display());
                continue;
            }
            files.push(entry.path());
        }

        match files.len() {
            0 => Err(MnpError::NoFileAvailable {
                country,
                directory: directory.clone(),
            }),
            1 => {
                let path = files.remove(0);
                info!("Found {} source file: {}", country, path.display());
                Ok(path)
            }
            count => Err(MnpError::TooManyFiles {
                country,
                directory: directory.clone(),
                count,
            }),
        }
    }
}
