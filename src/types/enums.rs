//! Enumeration types for the elevator simulator
//!
//! This module contains the display-facing enumerations (indicator states, button
//! kinds), the scheduler phase, and the request kinds used by scenarios.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visual state of the per-floor indicator next to an entrance's call button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorState {
    /// Nothing pending for this floor
    #[default]
    Idle,
    /// A stop is outstanding for this floor
    Called,
    /// The cabin is at this floor with doors cycling
    Active,
}

impl fmt::Display for IndicatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorState::Idle => write!(f, "idle"),
            IndicatorState::Called => write!(f, "called"),
            IndicatorState::Active => write!(f, "active"),
        }
    }
}

/// The two independent button sets of an entrance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    /// Hallway call button on a storey
    Outside,
    /// Floor selection button on the in-cabin panel
    Cabin,
}

impl fmt::Display for ButtonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonKind::Outside => write!(f, "outside"),
            ButtonKind::Cabin => write!(f, "cabin"),
        }
    }
}

/// Where an elevator is in its motion/door cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase")]
pub enum ElevatorPhase {
    /// Doors closed, queue empty, not engaged
    Idle,
    /// Travelling towards a latched target
    Moving {
        /// Floor the cabin is travelling to
        target: crate::types::FloorId,
    },
    /// Arrived, doors on their way open
    DoorsOpening,
    /// Doors open, auto-close timer armed
    DoorsOpen,
    /// Doors on their way closed
    DoorsClosing,
}

impl ElevatorPhase {
    /// Whether the cabin is between floors
    pub fn is_moving(&self) -> bool {
        matches!(self, ElevatorPhase::Moving { .. })
    }
}

impl fmt::Display for ElevatorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElevatorPhase::Idle => write!(f, "Idle"),
            ElevatorPhase::Moving { target } => write!(f, "Moving to {}", target),
            ElevatorPhase::DoorsOpening => write!(f, "Doors Opening"),
            ElevatorPhase::DoorsOpen => write!(f, "Doors Open"),
            ElevatorPhase::DoorsClosing => write!(f, "Doors Closing"),
        }
    }
}

/// Kind of button press a scenario step performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// Outside call for a floor
    Call,
    /// In-cabin selection of a floor
    Select,
}

impl RequestKind {
    /// Button set a request of this kind is raised from
    pub fn button(self) -> ButtonKind {
        match self {
            RequestKind::Call => ButtonKind::Outside,
            RequestKind::Select => ButtonKind::Cabin,
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::Call => write!(f, "call"),
            RequestKind::Select => write!(f, "select"),
        }
    }
}

impl FromStr for RequestKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "call" | "outside" => Ok(RequestKind::Call),
            "select" | "cabin" => Ok(RequestKind::Select),
            _ => Err(format!("Unknown request kind: {}", s)),
        }
    }
}
