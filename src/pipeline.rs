//! Daily normalization run.
//!
//! Processes every enabled country in enumeration order: fetch the raw
//! extract, parse it, reject an empty result and persist the records. A
//! failing country is logged and the run moves on. The full feed is rebuilt
//! from whatever HLR3 files exist once all countries are done.

use crate::aggregator::{AggregateStats, Aggregator};
use crate::config::MnpConfig;
use crate::country::Country;
use crate::error::{MnpError, Result};
use crate::models::ParseStats;
use crate::parsers::parser_for;
use crate::source::{DirectorySource, FileSource};
use crate::writer::{CsvResultWriter, ResultSink, SavedFiles};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// How one country fared in a run
#[derive(Debug)]
pub enum CountryOutcome {
    Saved {
        source: PathBuf,
        stats: ParseStats,
        files: SavedFiles,
    },
    Failed(MnpError),
}

impl CountryOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CountryOutcome::Saved { .. })
    }
}

/// Summary of a pipeline run
#[derive(Debug)]
pub struct RunStats {
    pub outcomes: Vec<(Country, CountryOutcome)>,
    pub aggregate: AggregateStats,
    pub elapsed: Duration,
}

impl RunStats {
    pub fn countries_succeeded(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_success()).count()
    }

    pub fn countries_failed(&self) -> usize {
        self.outcomes.len() - self.countries_succeeded()
    }

    pub fn outcome(&self, country: Country) -> Option<&CountryOutcome> {
        self.outcomes
            .iter()
            .find(|(c, _)| *c == country)
            .map(|(_, outcome)| outcome)
    }
}

pub struct Pipeline {
    config: MnpConfig,
    source: Box<dyn FileSource>,
    sink: Box<dyn ResultSink>,
}

impl Pipeline {
    /// Pipeline with drop-directory acquisition and CSV persistence from `config`
    pub fn new(config: MnpConfig) -> Self {
        let source = DirectorySource::from_config(&config);
        let sink = CsvResultWriter::new(&config.hlr_directory, &config.hlr3_directory);
        Self {
            config,
            source: Box::new(source),
            sink: Box::new(sink),
        }
    }

    pub fn with_source(mut self, source: impl FileSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    pub fn with_sink(mut self, sink: impl ResultSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Run every enabled country, then rebuild the full feed.
    ///
    /// Only an aggregation failure is returned as an error; country failures
    /// are reported in [`RunStats::outcomes`].
    pub fn run(&self) -> Result<RunStats> {
        let start_time = Instant::now();
        let countries = self.config.enabled_countries();
        info!("Starting MNP run for {} countries", countries.len());

        let mut outcomes = Vec::with_capacity(countries.len());
        for &country in &countries {
            let outcome = match self.process_country(country) {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("Failed to process {}: {}", country, e);
                    CountryOutcome::Failed(e)
                }
            };
            outcomes.push((country, outcome));
        }

        let aggregate = Aggregator::new(&self.config.hlr3_directory, &self.config.full_hlr_file)
            .aggregate(&countries)?;

        let stats = RunStats {
            outcomes,
            aggregate,
            elapsed: start_time.elapsed(),
        };
        info!(
            "MNP run finished in {:.2}s: {} succeeded, {} failed",
            stats.elapsed.as_secs_f64(),
            stats.countries_succeeded(),
            stats.countries_failed()
        );
        Ok(stats)
    }

    /// Fetch, parse and persist one country
    pub fn process_country(&self, country: Country) -> Result<CountryOutcome> {
        info!("Start processing {}", country);

        let parser = parser_for(country, &self.config)?;
        let source = self.source.fetch(country)?;
        let result = parser.parse(&source)?;

        if result.is_empty() {
            return Err(MnpError::EmptyResult {
                country,
                hlr_count: result.hlr_records.len(),
                hlr3_count: result.hlr3_records.len(),
            });
        }

        let files = self.sink.save(&result, country)?;
        info!("Finished processing {}", country);

        Ok(CountryOutcome::Saved {
            source,
            stats: result.stats,
            files,
        })
    }
}
