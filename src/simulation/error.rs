//! Error types and handling
//!
//! This module contains the errors raised at the scheduler boundary and the errors
//! of the simulation driver that wraps them.

use crate::types::{ConfigError, ConfigValidationError, EntranceId, FloorId};
use thiserror::Error;

/// Completion signals a display layer reports back to a scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The cabin finished its motion
    MotionCompleted,
    /// The doors finished opening
    DoorsOpened,
    /// The doors finished closing
    DoorsClosed,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::MotionCompleted => write!(f, "motion completed"),
            Signal::DoorsOpened => write!(f, "doors reached open state"),
            Signal::DoorsClosed => write!(f, "doors reached closed state"),
        }
    }
}

/// Errors raised by an elevator scheduler or the house routing requests to it
///
/// None of these are fatal. A rejected request leaves the scheduler untouched and
/// may be retried with a valid floor; an out-of-order signal is dropped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ElevatorError {
    /// Floor outside `[1, storeys]`
    #[error("Invalid floor {floor}: house has floors 1 to {storeys}")]
    InvalidFloor {
        /// The rejected floor
        floor: FloorId,
        /// Number of storeys of the house
        storeys: u32,
    },

    /// Completion signal that does not match the current phase
    #[error("Out-of-order signal at {entrance}: {signal} while {phase}")]
    OutOfOrderSignal {
        /// Entrance that received the signal
        entrance: EntranceId,
        /// The unexpected signal
        signal: Signal,
        /// Phase the scheduler was in
        phase: String,
    },

    /// Entrance index outside the house
    #[error("Unknown entrance {entrance}: house has {entrances} entrances")]
    UnknownEntrance {
        /// The rejected entrance
        entrance: EntranceId,
        /// Number of entrances of the house
        entrances: usize,
    },

    /// Storey count of zero
    #[error("An elevator needs at least one storey")]
    InvalidStoreyCount,

    /// Non-positive or non-finite storey height
    #[error("Storey height must be a positive number, got {0}")]
    InvalidStoreyHeight(f64),
}

impl ElevatorError {
    /// Check if this error is a display-layer protocol violation
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, ElevatorError::OutOfOrderSignal { .. })
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            ElevatorError::InvalidFloor { .. } => "Invalid Floor",
            ElevatorError::OutOfOrderSignal { .. } => "Protocol Violation",
            ElevatorError::UnknownEntrance { .. } => "Unknown Entrance",
            ElevatorError::InvalidStoreyCount | ElevatorError::InvalidStoreyHeight(_) => {
                "Construction"
            }
        }
    }
}

/// Result type for scheduler operations
pub type ElevatorResult<T> = Result<T, ElevatorError>;

/// Errors that can occur while running a simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(String),

    /// Scenario could not be loaded or refers to things that do not exist
    #[error("Scenario error: {0}")]
    ScenarioError(String),

    /// A scheduler rejected a request or signal
    #[error("Elevator error: {0}")]
    Elevator(#[from] ElevatorError),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A signal would fall past the end of simulation time
    #[error("Simulation time overflow at {entrance}: {now_ms} ms + {after_ms} ms is past the end of simulation time")]
    TimeOverflow {
        /// Entrance the signal was for
        entrance: EntranceId,
        /// Simulation time the signal was scheduled at
        now_ms: u64,
        /// Requested delay
        after_ms: u64,
    },
}

impl From<ConfigError> for SimulationError {
    fn from(error: ConfigError) -> Self {
        SimulationError::ConfigurationError(error.to_string())
    }
}

impl From<ConfigValidationError> for SimulationError {
    fn from(error: ConfigValidationError) -> Self {
        SimulationError::ConfigurationError(error.to_string())
    }
}

impl SimulationError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a scenario error
    pub fn scenario_error(msg: impl Into<String>) -> Self {
        Self::ScenarioError(msg.into())
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimulationError::ConfigurationError(_) => false,
            SimulationError::ScenarioError(_) => false,
            SimulationError::Elevator(_) => true,
            SimulationError::IoError(_) => false,
            SimulationError::SerializationError(_) => false,
            SimulationError::TimeOverflow { .. } => false,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::ScenarioError(_) => "Scenario",
            SimulationError::Elevator(inner) => inner.category(),
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
            SimulationError::TimeOverflow { .. } => "Time Overflow",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
