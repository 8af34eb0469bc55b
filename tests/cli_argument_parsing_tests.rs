//! Tests for CLI argument parsing functionality
//!
//! These tests verify that command line arguments are parsed, merged with an
//! optional configuration file, and validated before a house is built.

use clap::Parser;
use house_elevator_simulator::types::config::{defaults, CliArgs, ConfigError, HouseConfig};
use std::fs;
use tempfile::TempDir;

/// Test that no arguments yields the default house
#[test]
fn test_no_arguments_uses_defaults() {
    let cli_args = CliArgs::try_parse_from(["test"]).unwrap();
    assert_eq!(cli_args.entrances, None);
    assert_eq!(cli_args.storeys, None);
    assert!(!cli_args.ask);
    assert!(!cli_args.dry_run);

    let config = HouseConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config, HouseConfig::default());
    assert_eq!(config.entrances, defaults::ENTRANCES);
    assert_eq!(config.storeys, defaults::STOREYS);
}

/// Test house size arguments
#[test]
fn test_house_size_arguments() {
    let args = ["test", "--entrances", "4", "--storeys", "12", "--storey-height", "80"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert_eq!(cli_args.entrances, Some(4));
    assert_eq!(cli_args.storeys, Some(12));
    assert_eq!(cli_args.storey_height, Some(80.0));

    let config = HouseConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.entrances, 4);
    assert_eq!(config.storeys, 12);
    assert_eq!(config.shaft_height(), 880.0);
    config.validate().unwrap();
}

/// Test timing arguments
#[test]
fn test_timing_arguments() {
    let args = [
        "test",
        "--auto-close-ms", "1500",
        "--door-transition-ms", "400",
        "--door-jitter-ms", "50",
        "--ms-per-unit", "2.5",
        "--seed", "12345",
    ];
    let config = HouseConfig::from_cli_args(CliArgs::try_parse_from(args).unwrap()).unwrap();
    assert_eq!(config.auto_close_ms, 1_500);
    assert_eq!(config.door_transition_ms, 400);
    assert_eq!(config.door_jitter_ms, 50);
    assert_eq!(config.ms_per_unit, 2.5);
    assert_eq!(config.seed, Some(12345));
}

/// Test zero sizes parse but fail validation
#[test]
fn test_zero_entrances_fails_validation() {
    let cli_args = CliArgs::try_parse_from(["test", "--entrances", "0"]).unwrap();
    let config = HouseConfig::from_cli_args(cli_args).unwrap();
    assert!(config.validate().is_err(), "Zero entrances should fail validation");
}

/// Test values that parse but are out of range fail validation
#[test]
fn test_out_of_range_values_fail_validation() {
    for args in [
        ["test", "--ms-per-unit", "inf"],
        ["test", "--ms-per-unit", "1e300"],
        ["test", "--storeys", "4000000000"],
        ["test", "--door-jitter-ms", "18446744073709551615"],
    ] {
        let config = HouseConfig::from_cli_args(CliArgs::try_parse_from(args).unwrap()).unwrap();
        assert!(config.validate().is_err(), "{:?} should fail validation", args);
    }
}

/// Test malformed numbers are rejected by the parser
#[test]
fn test_malformed_numbers_are_rejected() {
    assert!(CliArgs::try_parse_from(["test", "--storeys", "five"]).is_err());
    assert!(CliArgs::try_parse_from(["test", "--entrances", "-1"]).is_err());
    assert!(CliArgs::try_parse_from(["test", "--auto-close-ms", "1.5"]).is_err());
}

/// Test verbose and debug flags
#[test]
fn test_logging_flags() {
    let cli_args = CliArgs::try_parse_from(["test", "--verbose"]).unwrap();
    assert!(cli_args.verbose);
    assert!(!cli_args.debug);

    let cli_args = CliArgs::try_parse_from(["test", "-d"]).unwrap();
    assert!(!cli_args.verbose);
    assert!(cli_args.debug);
}

/// Test flags that change what the binary does
#[test]
fn test_mode_flags() {
    let cli_args = CliArgs::try_parse_from(["test", "--ask", "--dry-run"]).unwrap();
    assert!(cli_args.ask);
    assert!(cli_args.dry_run);
    assert!(!cli_args.print_config);

    let cli_args = CliArgs::try_parse_from(["test", "--print-config"]).unwrap();
    assert!(cli_args.print_config);
}

/// Test scenario and output paths
#[test]
fn test_scenario_and_output_paths() {
    let args = ["test", "--scenario", "rush.json", "--output", "commands.jsonl"];
    let config = HouseConfig::from_cli_args(CliArgs::try_parse_from(args).unwrap()).unwrap();
    assert_eq!(config.scenario.as_deref(), Some("rush.json"));
    assert_eq!(config.output.as_deref(), Some("commands.jsonl"));
}

/// Test that CLI arguments override the configuration file
#[test]
fn test_cli_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("house.json");
    fs::write(&path, r#"{ "entrances": 3, "storeys": 9, "seed": 7 }"#).unwrap();
    let path = path.to_str().unwrap();

    let args = ["test", "--config", path, "--storeys", "4"];
    let config = HouseConfig::from_cli_args(CliArgs::try_parse_from(args).unwrap()).unwrap();

    assert_eq!(config.entrances, 3);
    assert_eq!(config.storeys, 4);
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.auto_close_ms, defaults::AUTO_CLOSE_MS);
}

/// Test that a saved configuration loads back unchanged
#[test]
fn test_saved_config_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.json");

    let config = HouseConfig {
        entrances: 5,
        storeys: 7,
        door_jitter_ms: 120,
        seed: Some(3),
        scenario: Some("evening.json".to_string()),
        ..Default::default()
    };
    config.save_to_file(&path).unwrap();

    assert_eq!(HouseConfig::from_file(&path).unwrap(), config);
}

/// Test configuration file errors
#[test]
fn test_config_file_errors() {
    let dir = TempDir::new().unwrap();

    let missing = dir.path().join("missing.json");
    assert!(matches!(HouseConfig::from_file(&missing), Err(ConfigError::FileNotFound(_))));

    let toml = dir.path().join("house.toml");
    fs::write(&toml, "storeys = 4").unwrap();
    assert!(matches!(
        HouseConfig::from_file(&toml),
        Err(ConfigError::UnsupportedFormat(ext)) if ext == "toml"
    ));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ \"storeys\": ").unwrap();
    assert!(matches!(HouseConfig::from_file(&broken), Err(ConfigError::JsonError(_))));

    let args = ["test", "--config", missing.to_str().unwrap()];
    assert!(HouseConfig::from_cli_args(CliArgs::try_parse_from(args).unwrap()).is_err());
}

/// Test the printed default configuration
#[test]
fn test_print_json_is_loadable() {
    let json = HouseConfig::default().print_json().unwrap();
    assert!(json.contains("\"entrances\": 2"));
    assert!(json.contains("\"storeys\": 5"));

    let parsed: HouseConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, HouseConfig::default());
}
