//! Tests for parser dispatch

use super::create_temp_file;
use crate::config::MnpConfig;
use crate::country::Country;
use crate::error::MnpError;
use crate::parsers::parser_for;
use std::collections::BTreeMap;

fn all_enabled() -> MnpConfig {
    let mut config = MnpConfig::default().with_countries(Country::ALL.to_vec());
    config.georgia.operator_table = Some(BTreeMap::from([("7".to_string(), "28301".to_string())]));
    config
}

#[test]
fn test_every_country_has_a_parser() {
    let config = all_enabled();
    for country in Country::ALL {
        let parser = parser_for(country, &config).unwrap();
        assert_eq!(parser.country(), country);
    }
}

#[test]
fn test_disabled_country_is_distinct_from_unknown() {
    let config = MnpConfig::default();

    match parser_for(Country::Georgia, &config) {
        Err(MnpError::CountryDisabled { country }) => assert_eq!(country, Country::Georgia),
        Err(other) => panic!("Expected CountryDisabled, got {:?}", other),
        Ok(_) => panic!("Expected CountryDisabled, got a parser"),
    }

    match "atlantis".parse::<Country>() {
        Err(MnpError::UnknownCountry { identifier }) => assert_eq!(identifier, "atlantis"),
        other => panic!("Expected UnknownCountry, got {:?}", other),
    }
}

#[test]
fn test_latvia_is_not_an_empty_success() {
    let file = create_temp_file("anything\n");
    let parser = parser_for(Country::Latvia, &all_enabled()).unwrap();

    match parser.parse(file.path()) {
        Err(MnpError::NotImplemented { country }) => assert_eq!(country, Country::Latvia),
        other => panic!("Expected NotImplemented, got {:?}", other),
    }
}

#[test]
fn test_configured_operator_table_reaches_parser() {
    let config = all_enabled();
    let file = create_temp_file(
        "H0;H1;H2;H3;H4;H5;H6;H7;H8;H9\n\
         10;X;2;555000111;X;7;X;X;X;2024-01-15 10:00:00\n\
         10;X;2;555000222;X;1;X;X;X;2024-01-15 10:00:00\n",
    );

    let result = parser_for(Country::Georgia, &config)
        .unwrap()
        .parse(file.path())
        .unwrap();

    assert_eq!(result.hlr_records.len(), 1);
    assert_eq!(result.hlr_records[0].mccmnc, "28301");
    assert_eq!(result.stats.rows_skipped, 1);
}

#[test]
fn test_georgia_without_operator_table_is_refused() {
    let mut config = all_enabled();
    config.georgia.operator_table = None;

    match parser_for(Country::Georgia, &config) {
        Err(MnpError::Configuration { message }) => {
            assert!(message.contains("georgia.operator_table"), "{}", message)
        }
        Err(other) => panic!("Expected Configuration error, got {:?}", other),
        Ok(_) => panic!("Expected Configuration error, got a parser"),
    }
}
