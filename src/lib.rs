//! House Elevator Simulator
//!
//! Request scheduling and a door/motion state machine for the elevators of a house
//! with several entrances, one elevator per entrance, driven by a simulated display
//! layer.
//!
//! # Overview
//!
//! Every elevator accepts two kinds of requests. Outside calls from a storey's
//! hallway join the end of its travel queue; selections made inside the cabin go to
//! the front. The elevator serves the queue head, opens its doors on arrival and
//! closes them again after a delay or as soon as the next floor is selected. It never
//! changes its target mid-trip and never moves with open doors.
//!
//! ## Key Features
//!
//! - **Per-Entrance Scheduling**: independent elevators, no shared state
//! - **Explicit State Machine**: typed phases and an inbox of transition events
//! - **Typed Display Commands**: indicator, button, door, cabin and panel updates
//! - **Cancellable Auto-Close**: ticketed timers, stale expiries are ignored
//! - **Deterministic Playback**: a virtual clock and seeded door timing
//! - **Scenarios and Logs**: JSON scenarios in, JSON-lines command logs out
//!
//! ## Quick Start
//!
//! ```rust
//! use house_elevator_simulator::*;
//!
//! let config = HouseConfig::default();
//! let mut driver = SimulationDriver::new(&config)?;
//!
//! driver.press(EntranceId(0), RequestKind::Call, FloorId(3))?;
//! driver.run_until_idle()?;
//!
//! let stats = driver.statistics();
//! println!("{}", stats.compact_summary());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, enums and configuration
//! - [`elevator`]: Travel queue, scheduler, door timer and display commands
//! - [`facility`]: House layout with one elevator per entrance
//! - [`simulation`]: Driver, clock, scenarios, statistics, errors and logging
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌──────────────┐    ┌──────────────┐
//! │   Types     │    │   Elevator   │    │   Facility   │
//! │             │    │              │    │              │
//! │ Identifiers │◄───┤ Scheduler    │◄───┤ House        │
//! │ Enums       │    │ TravelQueue  │    │ Entrances    │
//! │ Config      │    │ DoorTimer    │    │              │
//! └─────────────┘    └──────────────┘    └──────────────┘
//!                           ▲                   ▲
//!                           │ commands/signals  │
//!                    ┌──────────────────────────────────┐
//!                    │            Simulation            │
//!                    │                                  │
//!                    │ Driver  Clock  Timing  Scenario  │
//!                    │ Statistics  LogRecord  Logging   │
//!                    └──────────────────────────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod elevator;
pub mod facility;
pub mod simulation;
pub mod types;

// Core types and identifiers
pub use types::{
    // Enums
    ButtonKind,
    // Configuration
    CliArgs,
    ConfigError,
    ConfigValidationError,
    ElevatorPhase,
    // Identifiers
    EntranceId,
    FloorId,
    HouseConfig,
    IndicatorState,
    RequestKind,
    RunId,
};

// Elevator scheduling
pub use elevator::{
    DisplayState, DoorTimer, ElevatorCommand, ElevatorEvent, ElevatorScheduler, TimerTicket,
    TravelQueue,
};

// House layout
pub use facility::House;

// Simulation types and functionality
pub use simulation::{
    DisplaySignal, ElevatorError, ElevatorResult, LogRecord, LoggingConfig, PressOutcome,
    Scenario, ScenarioStep, SimClock, SimulationDriver, SimulationError, SimulationResult,
    SimulationStatistics,
};
