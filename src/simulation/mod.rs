//! Simulation driving and support
//!
//! This module contains the simulated display layer that runs a house, together with
//! its clock, timing model, scenarios, command log, statistics, error types and
//! logging setup.
//!
//! # Overview
//!
//! - **SimulationDriver**: forwards presses, plays back commands, delivers completion signals
//! - **SimClock**: virtual millisecond clock
//! - **TransitionTiming**: motion and door durations, with seeded door jitter
//! - **Scenario**: timed button presses loaded from JSON
//! - **LogRecord**: one timestamped command, written as JSON lines
//! - **SimulationStatistics**: per-entrance counters and the end-of-run summary
//! - **ElevatorError / SimulationError**: error handling for scheduler and driver
//!
//! # Usage Example
//!
//! ```rust
//! use house_elevator_simulator::simulation::*;
//! use house_elevator_simulator::types::*;
//!
//! let config = HouseConfig { entrances: 1, storeys: 4, ..Default::default() };
//! let mut driver = SimulationDriver::new(&config).unwrap();
//!
//! let scenario = Scenario::new(vec![
//!     ScenarioStep::call(0, 0, 4),
//!     ScenarioStep::call(1_500, 0, 2),
//! ]);
//! driver.run_scenario(&scenario).unwrap();
//!
//! println!("{}", driver.statistics().generate_summary());
//! ```

pub mod clock;
pub mod driver;
pub mod error;
pub mod logging;
pub mod record;
pub mod scenario;
pub mod statistics;
pub mod timing;

// Re-export all public types for convenience
pub use clock::*;
pub use driver::*;
pub use error::*;
pub use logging::*;
pub use record::*;
pub use scenario::*;
pub use statistics::*;
pub use timing::*;
