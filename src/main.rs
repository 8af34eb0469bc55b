// House Elevator Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/house-elevator-simulator
// ```
//
// Or with a scenario and a custom house:
//
// ```console
// $ ./target/release/house-elevator-simulator --entrances 3 --storeys 9 --scenario rush.json --verbose
// ```

use anyhow::Context;
use clap::Parser;
use house_elevator_simulator::simulation::{
    write_json_lines, LoggingConfig, LoggingGuard, Scenario, SimulationDriver,
};
use house_elevator_simulator::types::config::{parse_dimension, CliArgs};
use house_elevator_simulator::types::HouseConfig;
use std::io::{self, BufRead, Write};
use std::process;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        match HouseConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Initialize logging based on CLI flags; the guard flushes on exit
    let logging = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        LoggingConfig::new().with_level(tracing::Level::WARN).init()
    };

    let _logging_guard: LoggingGuard = match logging {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting House Elevator Simulator");

    // Load configuration from CLI arguments and optional config file
    let mut config = match HouseConfig::from_cli_args(args.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if args.ask {
        if let Err(e) = ask_house_size(&mut config) {
            error!("Failed to read the house size: {:#}", e);
            process::exit(1);
        }
    }

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        process::exit(1);
    }

    info!("Configuration loaded and validated successfully");

    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return;
    }

    print_startup_banner(&config);

    if let Err(e) = run_simulation(&config) {
        error!("Simulation failed: {:#}", e);
        process::exit(1);
    }

    info!("House Elevator Simulator completed successfully");
}

/// Prompt for the number of entrances and storeys, keeping configured values on bad input
fn ask_house_size(config: &mut HouseConfig) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    eprint!("Number of entrances [{}]: ", config.entrances);
    io::stderr().flush()?;
    let answer = lines.next().transpose().context("reading number of entrances")?.unwrap_or_default();
    config.entrances = parse_dimension(&answer, config.entrances, "entrances");

    eprint!("Number of storeys [{}]: ", config.storeys);
    io::stderr().flush()?;
    let answer = lines.next().transpose().context("reading number of storeys")?.unwrap_or_default();
    let storeys = parse_dimension(&answer, config.storeys as usize, "storeys");
    config.storeys = u32::try_from(storeys).context("storey count out of range")?;

    Ok(())
}

/// Build the house, play the scenario and write the command log
fn run_simulation(config: &HouseConfig) -> anyhow::Result<()> {
    let mut driver = SimulationDriver::new(config).context("failed to build the house")?;
    info!("Run {} started", driver.run_id());

    let scenario = match &config.scenario {
        Some(path) => Scenario::from_file(path)
            .with_context(|| format!("failed to load scenario '{}'", path))?,
        None => {
            eprintln!("No scenario given, running the built-in demo");
            Scenario::demo(driver.house())
        }
    };

    eprintln!("Running {} presses...", scenario.len());
    driver.run_scenario(&scenario).context("scenario run failed")?;

    match &config.output {
        Some(path) => {
            driver
                .save_log(path)
                .with_context(|| format!("failed to write command log '{}'", path))?;
            eprintln!("Command log written to: {}", path);
        }
        None => {
            write_json_lines(driver.log(), io::stdout().lock())
                .context("failed to write command log to stdout")?;
        }
    }

    eprintln!("{}", driver.statistics().generate_summary());
    Ok(())
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &HouseConfig) {
    eprintln!("House Elevator Simulator");
    eprintln!("========================");
    eprintln!("One elevator per entrance, calls and cabin selections in one travel order");
    eprintln!();

    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &HouseConfig) {
    eprintln!("Configuration:");
    eprintln!("  Entrances: {}", config.entrances);
    eprintln!("  Storeys: {}", config.storeys);
    eprintln!("  Storey Height: {} units (shaft {} units)", config.storey_height, config.shaft_height());
    eprintln!("  Door Auto-close: {} ms", config.auto_close_ms);
    eprintln!("  Door Transition: {} ms (+ up to {} ms jitter)", config.door_transition_ms, config.door_jitter_ms);
    eprintln!("  Motion Speed: {} ms per unit", config.ms_per_unit);
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    if let Some(scenario) = &config.scenario {
        eprintln!("  Scenario: {}", scenario);
    }
    eprintln!();
}
