//! Configuration structures for the elevator simulator
//!
//! This module contains the house configuration, the CLI argument structure and the
//! validation logic used to control the size of the house and the timing of the
//! simulated display layer.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Defaults used when the house size is not given or not understood
pub mod defaults {
    /// Number of entrances (one elevator each)
    pub const ENTRANCES: usize = 2;

    /// Number of storeys served by every elevator
    pub const STOREYS: u32 = 5;

    /// Distance between two storeys in display units
    pub const STOREY_HEIGHT: f64 = 100.0;

    /// Time the doors stay open before closing on their own
    pub const AUTO_CLOSE_MS: u64 = 3_000;

    /// Time a door open or close animation takes
    pub const DOOR_TRANSITION_MS: u64 = 1_000;

    /// Motion speed in milliseconds per display unit travelled
    pub const MS_PER_UNIT: f64 = 10.0;

    /// Largest accepted number of entrances
    pub const MAX_ENTRANCES: usize = 100;

    /// Largest accepted number of storeys
    pub const MAX_STOREYS: u32 = 1_000;

    /// Largest accepted storey height in display units
    pub const MAX_STOREY_HEIGHT: f64 = 10_000.0;

    /// Slowest accepted motion speed in milliseconds per display unit
    pub const MAX_MS_PER_UNIT: f64 = 1_000.0;

    /// Longest accepted auto-close delay, door transition or door jitter
    pub const MAX_DURATION_MS: u64 = 60 * 60 * 1_000;
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "house-elevator-simulator",
    version = "0.1.0",
    about = "House Elevator Simulator - Runs one elevator per entrance of a multi-storey house",
    long_about = "Simulates a house with several entrances, each served by its own elevator. Outside calls and cabin selections are scheduled into a single travel order per elevator, with doors that open on arrival and close on their own.

EXAMPLES:
    # Run the default house (2 entrances, 5 storeys) with a scenario
    house-elevator-simulator --scenario morning.json

    # Use a configuration file
    house-elevator-simulator --config house.json

    # Override the house size
    house-elevator-simulator --entrances 3 --storeys 9 --scenario rush.json

    # Generate configuration template
    house-elevator-simulator --print-config > my-house.json

    # Validate configuration without running
    house-elevator-simulator --config my-house.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Number of entrances in the house
    #[arg(
        long,
        help = "Number of entrances",
        long_help = "Number of entrances of the house. Every entrance has exactly one elevator. Must be between 1 and 100. Default: 2"
    )]
    pub entrances: Option<usize>,

    /// Number of storeys in the house
    #[arg(
        long,
        help = "Number of storeys",
        long_help = "Number of storeys served by every elevator. Must be between 1 and 1000. Default: 5"
    )]
    pub storeys: Option<u32>,

    /// Distance between two storeys in display units
    #[arg(long, help = "Distance between storeys in display units")]
    pub storey_height: Option<f64>,

    /// Time the doors stay open before closing on their own
    #[arg(long, help = "Door auto-close delay in milliseconds")]
    pub auto_close_ms: Option<u64>,

    /// Duration of a door open or close transition
    #[arg(long, help = "Door transition duration in milliseconds")]
    pub door_transition_ms: Option<u64>,

    /// Motion speed of the cabin
    #[arg(long, help = "Cabin motion speed in milliseconds per display unit")]
    pub ms_per_unit: Option<f64>,

    /// Upper bound of random extra time added to door transitions
    #[arg(long, help = "Maximum random extra door transition time in milliseconds")]
    pub door_jitter_ms: Option<u64>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Scenario file with timed button presses
    #[arg(long, help = "Scenario file path (JSON format)")]
    pub scenario: Option<String>,

    /// Output path for the display command log
    #[arg(long, help = "Output path for the command log JSONL file")]
    pub output: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Ask for the house size on stdin
    #[arg(
        long,
        help = "Ask for the number of entrances and storeys on startup",
        long_help = "Prompt for the number of entrances and storeys before running. Answers that are not a positive whole number fall back to the configured value."
    )]
    pub ask: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Number of entrances in the house
    pub entrances: Option<usize>,
    /// Number of storeys in the house
    pub storeys: Option<u32>,
    /// Distance between two storeys in display units
    pub storey_height: Option<f64>,
    /// Door auto-close delay in milliseconds
    pub auto_close_ms: Option<u64>,
    /// Door transition duration in milliseconds
    pub door_transition_ms: Option<u64>,
    /// Motion speed in milliseconds per display unit
    pub ms_per_unit: Option<f64>,
    /// Maximum random extra door transition time in milliseconds
    pub door_jitter_ms: Option<u64>,
    /// Random seed for reproducible results
    pub seed: Option<u64>,
    /// Scenario file path
    pub scenario: Option<String>,
    /// Output path for the command log
    pub output: Option<String>,
}

/// Configuration for the house and its simulated display layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseConfig {
    /// Number of entrances in the house
    pub entrances: usize,

    /// Number of storeys in the house
    pub storeys: u32,

    /// Distance between two storeys in display units
    pub storey_height: f64,

    /// Door auto-close delay in milliseconds
    pub auto_close_ms: u64,

    /// Door transition duration in milliseconds
    pub door_transition_ms: u64,

    /// Motion speed in milliseconds per display unit
    pub ms_per_unit: f64,

    /// Maximum random extra door transition time in milliseconds
    pub door_jitter_ms: u64,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Scenario file path
    pub scenario: Option<String>,

    /// Output path for the command log
    pub output: Option<String>,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for the house configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Entrance count is invalid
    #[error("Entrance count must be between 1 and {max}, got {0}", max = defaults::MAX_ENTRANCES)]
    InvalidEntranceCount(usize),

    /// Storey count is invalid
    #[error("Storey count must be between 1 and {max}, got {0}", max = defaults::MAX_STOREYS)]
    InvalidStoreyCount(u32),

    /// Storey height is invalid
    #[error("Storey height must be a positive number up to {max}, got {0}", max = defaults::MAX_STOREY_HEIGHT)]
    InvalidStoreyHeight(f64),

    /// Auto-close delay is invalid
    #[error("Door auto-close delay must be greater than 0 ms")]
    InvalidAutoCloseDelay,

    /// Motion speed is invalid
    #[error("Motion speed must be a positive number of ms per unit up to {max}, got {0}", max = defaults::MAX_MS_PER_UNIT)]
    InvalidMotionSpeed(f64),

    /// A door or timer duration is too long
    #[error("{field} must be at most {max} ms, got {value}", max = defaults::MAX_DURATION_MS)]
    DurationTooLong {
        /// Name of the offending setting
        field: &'static str,
        /// The rejected value
        value: u64,
    },
}

impl Default for HouseConfig {
    fn default() -> Self {
        Self {
            entrances: defaults::ENTRANCES,
            storeys: defaults::STOREYS,
            storey_height: defaults::STOREY_HEIGHT,
            auto_close_ms: defaults::AUTO_CLOSE_MS,
            door_transition_ms: defaults::DOOR_TRANSITION_MS,
            ms_per_unit: defaults::MS_PER_UNIT,
            door_jitter_ms: 0,
            seed: None,
            scenario: None,
            output: None,
        }
    }
}

impl HouseConfig {
    /// Create a new configuration from command line arguments and optional config file
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::from_cli_args(args)
    }

    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let content = fs::read_to_string(path)?;
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            entrances: config_file.entrances.unwrap_or(defaults.entrances),
            storeys: config_file.storeys.unwrap_or(defaults.storeys),
            storey_height: config_file.storey_height.unwrap_or(defaults.storey_height),
            auto_close_ms: config_file.auto_close_ms.unwrap_or(defaults.auto_close_ms),
            door_transition_ms: config_file
                .door_transition_ms
                .unwrap_or(defaults.door_transition_ms),
            ms_per_unit: config_file.ms_per_unit.unwrap_or(defaults.ms_per_unit),
            door_jitter_ms: config_file.door_jitter_ms.unwrap_or(defaults.door_jitter_ms),
            seed: config_file.seed.or(defaults.seed),
            scenario: config_file.scenario.or(defaults.scenario),
            output: config_file.output.or(defaults.output),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.entrances {
            config.entrances = value;
        }
        if let Some(value) = args.storeys {
            config.storeys = value;
        }
        if let Some(value) = args.storey_height {
            config.storey_height = value;
        }
        if let Some(value) = args.auto_close_ms {
            config.auto_close_ms = value;
        }
        if let Some(value) = args.door_transition_ms {
            config.door_transition_ms = value;
        }
        if let Some(value) = args.ms_per_unit {
            config.ms_per_unit = value;
        }
        if let Some(value) = args.door_jitter_ms {
            config.door_jitter_ms = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.scenario {
            config.scenario = Some(value);
        }
        if let Some(value) = args.output {
            config.output = Some(value);
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(1..=defaults::MAX_ENTRANCES).contains(&self.entrances) {
            return Err(ConfigValidationError::InvalidEntranceCount(self.entrances));
        }

        if !(1..=defaults::MAX_STOREYS).contains(&self.storeys) {
            return Err(ConfigValidationError::InvalidStoreyCount(self.storeys));
        }

        // NaN and infinities fail these comparisons as well
        if !(self.storey_height > 0.0 && self.storey_height <= defaults::MAX_STOREY_HEIGHT) {
            return Err(ConfigValidationError::InvalidStoreyHeight(self.storey_height));
        }

        if !(self.ms_per_unit > 0.0 && self.ms_per_unit <= defaults::MAX_MS_PER_UNIT) {
            return Err(ConfigValidationError::InvalidMotionSpeed(self.ms_per_unit));
        }

        if self.auto_close_ms == 0 {
            return Err(ConfigValidationError::InvalidAutoCloseDelay);
        }

        for (field, value) in [
            ("auto_close_ms", self.auto_close_ms),
            ("door_transition_ms", self.door_transition_ms),
            ("door_jitter_ms", self.door_jitter_ms),
        ] {
            if value > defaults::MAX_DURATION_MS {
                return Err(ConfigValidationError::DurationTooLong { field, value });
            }
        }

        Ok(())
    }

    /// Total travel height of one elevator shaft
    pub fn shaft_height(&self) -> f64 {
        f64::from(self.storeys.saturating_sub(1)) * self.storey_height
    }
}

/// Parse a house dimension typed in by a user, falling back to `default`
///
/// Only plain digit strings are accepted. Anything else (empty input, signs,
/// decimals, words, or zero) is replaced by the default and reported with a warning.
pub fn parse_dimension(input: &str, default: usize, what: &str) -> usize {
    let trimmed = input.trim();
    let parsed = if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        trimmed.parse::<usize>().ok().filter(|value| *value > 0)
    } else {
        None
    };

    match parsed {
        Some(value) => value,
        None => {
            warn!("Not a usable number of {}: {:?}, using a default of {}", what, input, default);
            default
        }
    }
}
