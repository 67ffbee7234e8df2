//! Full feed aggregation.
//!
//! Concatenates the per-country HLR3 files, exactly as persistence wrote
//! them, into one feed file. Country blocks follow the order given by the
//! caller and each block keeps its own line order. The files are not
//! re-parsed, so delimiters, quoting and line endings pass through as is.

use crate::constants::OUTPUT_EXTENSION;
use crate::country::Country;
use crate::error::Result;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Outcome of one aggregation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateStats {
    pub countries_included: Vec<Country>,
    pub countries_missing: Vec<Country>,
    pub bytes_written: u64,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Aggregator {
    hlr3_directory: PathBuf,
    full_file: PathBuf,
}

impl Aggregator {
    pub fn new(hlr3_directory: impl Into<PathBuf>, full_file: impl Into<PathBuf>) -> Self {
        Self {
            hlr3_directory: hlr3_directory.into(),
            full_file: full_file.into(),
        }
    }

    /// Location of a country's HLR3 file: `<dir>/<prefix>/<prefix>.csv`
    pub fn country_file(hlr3_directory: &Path, country: Country) -> PathBuf {
        let prefix = country.file_prefix();
        hlr3_directory
            .join(prefix)
            .join(format!("{}.{}", prefix, OUTPUT_EXTENSION))
    }

    /// Rebuild the full feed file from the countries' HLR3 files.
    ///
    /// The output is truncated first. Missing country files are logged and
    /// left out; any other I/O failure aborts the run.
    pub fn aggregate(&self, countries: &[Country]) -> Result<AggregateStats> {
        info!("Start joining HLR3 files into {}", self.full_file.display());

        if let Some(parent) = self.full_file.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut output = BufWriter::new(File::create(&self.full_file)?);
        let mut stats = AggregateStats {
            output_path: self.full_file.clone(),
            ..AggregateStats::default()
        };

        for &country in countries {
            let path = Self::country_file(&self.hlr3_directory, country);
            info!("Join {}", path.display());

            let mut input = match File::open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    error!("Could not find {} HLR3 file {}", country, path.display());
                    stats.countries_missing.push(country);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            stats.bytes_written += io::copy(&mut input, &mut output)?;
            stats.countries_included.push(country);
        }

        output.flush()?;

        info!(
            "Finished joining {} countries ({} missing, {} bytes)",
            stats.countries_included.len(),
            stats.countries_missing.len(),
            stats.bytes_written
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_country(dir: &Path, country: Country, content: &str) {
        let path = Aggregator::country_file(dir, country);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_country_file_layout() {
        let path = Aggregator::country_file(Path::new("/data/hlr"), Country::Belarus);
        assert_eq!(path, PathBuf::from("/data/hlr/belarus/belarus.csv"));
    }

    #[test]
    fn test_blocks_follow_enumeration_order() {
        let temp_dir = TempDir::new().unwrap();
        let hlr3 = temp_dir.path().join("hlr3");
        write_country(&hlr3, Country::Belarus, "b1;25705;1;;\r\nb2;25702;2;;\r\n");
        write_country(&hlr3, Country::Kazakhstan, "k1;40101;3;R1;\r\n");

        let full = temp_dir.path().join("full.csv");
        let stats = Aggregator::new(&hlr3, &full)
            .aggregate(&[Country::Kazakhstan, Country::Belarus])
            .unwrap();

        assert_eq!(
            fs::read_to_string(&full).unwrap(),
            "k1;40101;3;R1;\r\nb1;25705;1;;\r\nb2;25702;2;;\r\n"
        );
        assert_eq!(
            stats.countries_included,
            vec![Country::Kazakhstan, Country::Belarus]
        );
        assert_eq!(stats.bytes_written, fs::metadata(&full).unwrap().len());
    }

    #[test]
    fn test_missing_country_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let hlr3 = temp_dir.path().join("hlr3");
        write_country(&hlr3, Country::Georgia, "g1;28201;1;;\n");
        write_country(&hlr3, Country::Belarus, "b1;25705;1;;\n");

        let full = temp_dir.path().join("out").join("full.csv");
        let stats = Aggregator::new(&hlr3, &full)
            .aggregate(&Country::ALL)
            .unwrap();

        assert_eq!(fs::read_to_string(&full).unwrap(), "g1;28201;1;;\nb1;25705;1;;\n");
        assert_eq!(
            stats.countries_missing,
            vec![Country::Latvia, Country::Kazakhstan]
        );
    }

    #[test]
    fn test_rerun_truncates_and_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let hlr3 = temp_dir.path().join("hlr3");
        write_country(&hlr3, Country::Kazakhstan, "k1;40101;3;\"R;1\";\r\n");

        let full = temp_dir.path().join("full.csv");
        fs::write(&full, "stale content from a previous day\n").unwrap();

        let aggregator = Aggregator::new(&hlr3, &full);
        aggregator.aggregate(&[Country::Kazakhstan]).unwrap();
        let first = fs::read(&full).unwrap();
        aggregator.aggregate(&[Country::Kazakhstan]).unwrap();
        let second = fs::read(&full).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, b"k1;40101;3;\"R;1\";\r\n".to_vec());
    }

    #[test]
    fn test_no_country_files_gives_empty_feed() {
        let temp_dir = TempDir::new().unwrap();
        let full = temp_dir.path().join("full.csv");

        let stats = Aggregator::new(temp_dir.path().join("hlr3"), &full)
            .aggregate(&[Country::Belarus])
            .unwrap();

        assert_eq!(fs::read(&full).unwrap().len(), 0);
        assert_eq!(stats.bytes_written, 0);
        assert_eq!(stats.countries_missing, vec![Country::Belarus]);
    }
}
