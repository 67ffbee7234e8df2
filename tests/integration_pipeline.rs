//! Integration tests for the daily MNP run
//!
//! Drops raw extracts into per-country directories, runs the pipeline and
//! checks the exact bytes of the per-country and aggregated output files.

use mnp_normalizer::parsers::parser_for;
use mnp_normalizer::pipeline::{CountryOutcome, Pipeline};
use mnp_normalizer::{Country, MnpConfig, MnpError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const GEORGIA_EXTRACT: &str = "\
RECORD_TYPE;SEQ;NUMBER_TYPE;NUMBER;DONOR;RECIPIENT;STATUS;REQ;RESP;PORT_DATE
10;1;2;555000111;4;7;A;X;X;2024-01-15 10:00:00
10;2;1;322000111;4;7;A;X;X;2024-01-15 10:00:00
20;3;2;555000222;4;7;A;X;X;2024-01-15 10:00:00
10;4;2;555000333;4;99;A;X;X;2024-01-15 10:00:00
10;5;2;555000444;7;4;A;X;X;2024-02-01 09:30:00
";

const KAZAKHSTAN_EXTRACT: &str = "\
Number,OwnerId,MNC,Route,PortDate,RowCount
77011234567,OWN1,1,R1,2024-01-15T10:00:00,2
77771234567,OWN2,77,,2024-02-01T09:30:00Z,2
";

fn drop_file(root: &Path, country: Country, name: &str, content: &str) -> PathBuf {
    let directory = root.join("incoming").join(country.file_prefix());
    fs::create_dir_all(&directory).unwrap();
    fs::write(directory.join(name), content).unwrap();
    directory
}

fn read(path: PathBuf) -> String {
    fs::read_to_string(path).unwrap()
}

/// Test a run over two working countries and one without an extract
///
/// Purpose: Validate the whole cycle from drop directories to the full feed
/// Benefit: Pins the bit-exact layouts the downstream loaders depend on
#[test]
fn test_daily_run_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    let georgia_dir = drop_file(root, Country::Georgia, "ge_20240201.csv", GEORGIA_EXTRACT);
    let kazakhstan_dir = drop_file(root, Country::Kazakhstan, "kz.csv", KAZAKHSTAN_EXTRACT);
    let belarus_dir = root.join("incoming").join("belarus");
    fs::create_dir_all(&belarus_dir).unwrap();

    let mut config = MnpConfig::default()
        .with_output_root(&root.join("out"))
        .with_countries(vec![Country::Belarus, Country::Kazakhstan, Country::Georgia])
        .with_source_directory(Country::Georgia, georgia_dir)
        .with_source_directory(Country::Kazakhstan, kazakhstan_dir)
        .with_source_directory(Country::Belarus, belarus_dir);
    config.georgia.operator_table = Some(BTreeMap::from([
        ("4".to_string(), "28204".to_string()),
        ("7".to_string(), "28207".to_string()),
    ]));
    config.validate().unwrap();

    let stats = Pipeline::new(config).run().unwrap();

    // Outcomes follow enumeration order, not configuration order
    let order: Vec<Country> = stats.outcomes.iter().map(|(c, _)| *c).collect();
    assert_eq!(
        order,
        vec![Country::Georgia, Country::Kazakhstan, Country::Belarus]
    );
    assert!(matches!(
        stats.outcome(Country::Belarus),
        Some(CountryOutcome::Failed(MnpError::NoFileAvailable { .. }))
    ));

    match stats.outcome(Country::Georgia) {
        Some(CountryOutcome::Saved { stats, .. }) => {
            assert_eq!(stats.rows_total, 5);
            assert_eq!(stats.rows_accepted, 2);
            assert_eq!(stats.rows_filtered, 2);
            assert_eq!(stats.rows_skipped, 1);
        }
        other => panic!("Expected Georgia to be saved, got {:?}", other),
    }

    let out = root.join("out");
    assert_eq!(
        read(out.join("hlr").join("georgia").join("georgia.csv")),
        "555000111;28207\r\n555000444;28204\r\n"
    );
    let georgia_hlr3 = "555000111;28207;1705312800;;\r\n555000444;28204;1706779800;;\r\n";
    assert_eq!(
        read(out.join("hlr3").join("georgia").join("georgia.csv")),
        georgia_hlr3
    );

    let kazakhstan_hlr3 = "77011234567;40101;1705312800;R1;\r\n77771234567;401077;1706779800;;\r\n";
    assert_eq!(
        read(out.join("hlr").join("kazakhstan").join("kazakhstan.csv")),
        "77011234567;40101\r\n77771234567;401077\r\n"
    );
    assert_eq!(
        read(out.join("hlr3").join("kazakhstan").join("kazakhstan.csv")),
        kazakhstan_hlr3
    );

    assert!(!out.join("hlr3").join("belarus").exists());
    assert_eq!(
        read(out.join("full_hlr.csv")),
        format!("{}{}", georgia_hlr3, kazakhstan_hlr3)
    );
    assert_eq!(
        stats.aggregate.countries_missing,
        vec![Country::Belarus]
    );
}

/// Test that a failing day keeps the previous day's country file in the feed
///
/// Purpose: Validate that aggregation uses whatever HLR3 files exist
/// Benefit: One broken source never empties the whole feed
#[test]
fn test_failed_country_keeps_previous_output() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    let kazakhstan_dir = drop_file(root, Country::Kazakhstan, "kz.csv", KAZAKHSTAN_EXTRACT);
    let config = MnpConfig::default()
        .with_output_root(&root.join("out"))
        .with_countries(vec![Country::Kazakhstan])
        .with_source_directory(Country::Kazakhstan, kazakhstan_dir.clone());

    Pipeline::new(config.clone()).run().unwrap();
    let first_feed = read(config.full_hlr_file.clone());

    // Next day two files arrive at once
    fs::write(kazakhstan_dir.join("kz_second.csv"), KAZAKHSTAN_EXTRACT).unwrap();
    let stats = Pipeline::new(config.clone()).run().unwrap();

    assert!(matches!(
        stats.outcome(Country::Kazakhstan),
        Some(CountryOutcome::Failed(MnpError::TooManyFiles { count: 2, .. }))
    ));
    assert_eq!(read(config.full_hlr_file.clone()), first_feed);
}

/// Test the dispatcher against a configuration file
///
/// Purpose: Validate country switches and operator tables loaded from TOML
/// Benefit: Catches configuration mistakes before a daily run
#[test]
fn test_dispatch_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("mnp.toml");
    fs::write(
        &config_path,
        r#"
countries = ["georgia", "latvia"]

[georgia.operator_table]
7 = "28301"
"#,
    )
    .unwrap();

    let config = MnpConfig::from_file(&config_path).unwrap();
    config.validate().unwrap();

    let extract = temp_dir.path().join("ge.csv");
    fs::write(&extract, GEORGIA_EXTRACT).unwrap();

    let result = parser_for(Country::Georgia, &config)
        .unwrap()
        .parse(&extract)
        .unwrap();
    assert_eq!(result.hlr_records.len(), 1);
    assert_eq!(result.hlr_records[0].mccmnc, "28301");
    assert!(result.is_paired());

    assert!(matches!(
        parser_for(Country::Latvia, &config).unwrap().parse(&extract),
        Err(MnpError::NotImplemented { .. })
    ));
    assert!(matches!(
        parser_for(Country::Belarus, &config),
        Err(MnpError::CountryDisabled { .. })
    ));
    assert!(matches!(
        "estonia".parse::<Country>(),
        Err(MnpError::UnknownCountry { .. })
    ));
}
